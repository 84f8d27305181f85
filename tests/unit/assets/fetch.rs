use super::*;

#[test]
fn resolve_strips_leading_slash_and_query() {
    let f = FsFetcher::new("/srv/public");
    assert_eq!(
        f.resolve("/images/sequence/00001.webp?v=hd-q80").unwrap(),
        PathBuf::from("/srv/public/images/sequence/00001.webp")
    );
    assert_eq!(
        f.resolve("./frames/007.png").unwrap(),
        PathBuf::from("/srv/public/frames/007.png")
    );
}

#[test]
fn resolve_rejects_parent_components() {
    let f = FsFetcher::new("root");
    assert!(f.resolve("../secret.png").is_err());
    assert!(f.resolve("/images/../../x.png").is_err());
}
