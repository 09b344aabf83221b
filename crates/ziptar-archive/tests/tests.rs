use std::fs;
use std::io::Cursor;
use std::path::Path;

use ziptar_archive::{
    ArchiveType, Compression, CreateOptions, create_tar, create_zip, extract_zip, list_zip,
};

fn sample_tree() -> tempfile::TempDir {
    let dir = tempfile::Builder::new()
        .prefix("ziptar-test-src-")
        .tempdir()
        .expect("Failed to create temp dir");
    let root = dir.path();
    fs::write(root.join("a.txt"), b"first file\n").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/b.txt"), b"second file\n").unwrap();
    dir
}

#[test]
fn zip_create_list_extract() {
    let src = sample_tree();

    let (mut archive, created) = create_zip(
        Cursor::new(Vec::new()),
        src.path(),
        &["."],
        &CreateOptions::default(),
    )
    .unwrap();
    assert_eq!(created.archive, ArchiveType::Zip);
    assert_eq!(created.entry_count, 2);

    archive.set_position(0);
    let mut listing = Vec::new();
    let listed = list_zip(&mut archive, &mut listing).unwrap();
    assert_eq!(listing, b"a.txt\nsub/b.txt\n");
    assert_eq!(listed.entry_count, 2);

    archive.set_position(0);
    let dest = tempfile::tempdir().unwrap();
    let extracted = extract_zip(archive, dest.path()).unwrap();
    assert_eq!(extracted.entry_count, 2);
    assert_eq!(
        fs::read(dest.path().join("a.txt")).unwrap(),
        fs::read(src.path().join("a.txt")).unwrap()
    );
    assert_eq!(
        fs::read(dest.path().join("sub").join("b.txt")).unwrap(),
        fs::read(src.path().join("sub").join("b.txt")).unwrap()
    );
}

#[test]
fn zip_member_names_keep_argument_prefix() {
    let src = sample_tree();

    let (mut archive, _) = create_zip(
        Cursor::new(Vec::new()),
        src.path(),
        &["sub", "a.txt"],
        &CreateOptions::default(),
    )
    .unwrap();

    archive.set_position(0);
    let mut listing = Vec::new();
    list_zip(archive, &mut listing).unwrap();
    assert_eq!(listing, b"sub/b.txt\na.txt\n");
}

#[test]
fn zip_create_missing_member_fails() {
    let src = sample_tree();
    let result = create_zip(
        Cursor::new(Vec::new()),
        src.path(),
        &[Path::new("does-not-exist")],
        &CreateOptions::default(),
    );
    assert!(result.is_err());
}

#[test]
#[cfg(feature = "gzip")]
fn tar_gz_round_trips_through_tar_crate() {
    let src = sample_tree();

    let (bytes, report) = create_tar(
        Vec::new(),
        Compression::Gzip,
        src.path(),
        &["."],
        &CreateOptions::default(),
    )
    .unwrap();
    assert_eq!(report.archive, ArchiveType::Tar(Compression::Gzip));

    let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(&bytes[..]));
    let names: Vec<String> = archive
        .entries()
        .unwrap()
        .map(|e| {
            e.unwrap()
                .path()
                .unwrap()
                .to_string_lossy()
                .trim_end_matches('/')
                .to_owned()
        })
        .collect();
    assert_eq!(names, ["a.txt", "sub", "sub/b.txt"]);
}

#[test]
#[cfg(feature = "bzip2")]
fn tar_bz2_unpacks_with_original_content() {
    let src = sample_tree();

    let (bytes, _) = create_tar(
        Vec::new(),
        Compression::Bzip2,
        src.path(),
        &["sub"],
        &CreateOptions::default(),
    )
    .unwrap();

    let dest = tempfile::tempdir().unwrap();
    tar::Archive::new(bzip2::read::BzDecoder::new(&bytes[..]))
        .unpack(dest.path())
        .unwrap();
    assert_eq!(
        fs::read(dest.path().join("sub").join("b.txt")).unwrap(),
        b"second file\n"
    );
}
