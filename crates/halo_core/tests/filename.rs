use halo_core::{canonical_filename, partial_filename};

#[test]
fn canonical_name_encodes_id_release_and_filename() {
    assert_eq!(
        canonical_filename("42", "2", "gamma_profile.nc"),
        "HALO-DB_dataset42_release2_gamma_profile.nc"
    );
}

#[test]
fn canonical_name_is_deterministic() {
    let inputs = [("1", "3", "a.nc"), ("2", "1", "b.nc"), ("1", "3", "a.nc")];
    let names: Vec<String> = inputs
        .iter()
        .map(|(id, release, file)| canonical_filename(id, release, file))
        .collect();
    assert_eq!(names[0], names[2]);
    assert_ne!(names[0], names[1]);

    let reversed: Vec<String> = inputs
        .iter()
        .rev()
        .map(|(id, release, file)| canonical_filename(id, release, file))
        .collect();
    assert_eq!(names[1], reversed[1]);
}

#[test]
fn partial_name_never_equals_canonical_name() {
    let canonical = canonical_filename("42", "2", "gamma_profile.nc");
    let partial = partial_filename(&canonical);
    assert_eq!(partial, "HALO-DB_dataset42_release2_gamma_profile.nc.partial");
    assert_ne!(partial, canonical);
}

#[test]
fn partial_names_differ_for_files_sharing_a_stem() {
    let nc = partial_filename(&canonical_filename("1", "1", "data.nc"));
    let txt = partial_filename(&canonical_filename("1", "1", "data.txt"));
    assert_ne!(nc, txt);
}
