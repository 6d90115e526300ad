use image_name::{is_image_matched, split, ImageName, Matcher};

#[test]
fn split_references() {
    assert_eq!(split("repo"), ("repo", ""));
    assert_eq!(split("repo:v1"), ("repo", ":v1"));
    assert_eq!(split("host:5000/repo"), ("host:5000/repo", ""));
    assert_eq!(split("host:5000/repo:v1"), ("host:5000/repo", ":v1"));
    assert_eq!(split("repo@sha256:abcd1234"), ("repo", "@sha256:abcd1234"));
    assert_eq!(
        split("repo:v1@sha256:abcd1234"),
        ("repo", ":v1@sha256:abcd1234")
    );
}

#[test]
fn match_references() {
    assert!(is_image_matched("repo", "repo"));
    assert!(is_image_matched("repo:v1", "repo"));
    assert!(is_image_matched("repo@sha256:abcd1234", "repo"));
    assert!(is_image_matched("repo:{BUILD_TAG}", "repo"));

    assert!(!is_image_matched("repo2:v1", "repo"));
}

#[test]
fn match_split_names() {
    // The name from `split` always matches its own reference, as long
    // as the suffix uses the characters accepted by the matcher.
    const REFERENCES: &[&str] = &[
        "debian",
        "debian:stable",
        "nixos/nix:2.24.1",
        "ghcr.io/foo/bar@sha256:0123456789abcdef",
        "registry.example.com:5000/foo/bar:1.2.3@sha256:0123456789abcdef",
        "app:{STABLE_GIT_COMMIT}",
    ];

    for reference in REFERENCES {
        let image = ImageName::from(*reference);
        let matcher = Matcher::literal(image.name);

        assert!(image.is_match(&matcher), "{reference}");
        assert!(matcher.is_match(reference), "{reference}");
        assert_eq!(image.to_string(), *reference);
    }
}

#[test]
fn share_matcher_between_threads() {
    let matcher = &Matcher::new("nginx");

    std::thread::scope(|scope| {
        let handles: Vec<_> = ["nginx:1", "nginx:2", "nginx@sha256:ab"]
            .into_iter()
            .map(|reference| scope.spawn(move || matcher.is_match(reference)))
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    });
}
