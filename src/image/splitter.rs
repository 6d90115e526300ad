//! Split an image reference into its name and its tag or digest.
//!
//! The split is lossless: the name followed by the tag is always the
//! original reference.

/// Split `reference` into `(name, tag)`.
///
/// The tag keeps its separator, so it is either empty or starts with
/// `:` or `@`. A reference with both a tag and a digest is split at the
/// tag, and the digest stays in the returned tag.
///
/// This function never fails: any input, including an empty string,
/// produces a pair.
///
/// # Examples
///
/// ```
/// # use image_name::split;
/// assert_eq!(split("nginx:1.25"), ("nginx", ":1.25"));
/// assert_eq!(split("localhost:5000/app"), ("localhost:5000/app", ""));
/// assert_eq!(
///     split("ghcr.io/foo/bar:v1@sha256:0123"),
///     ("ghcr.io/foo/bar", ":v1@sha256:0123"),
/// );
/// ```
pub fn split(reference: &str) -> (&str, &str) {
    let at = reference.rfind('@');

    // A leading `@` does not limit where the tag can be.
    let end = match at {
        Some(i) if i > 0 => i,
        _ => reference.len(),
    };

    let colon = match reference.find('/') {
        // No domain: the tag is the last `:` before the digest.
        None => reference[..end].rfind(':'),

        // Everything before the first `/` may be a `host:port`, so the
        // tag is only searched after it.
        //
        // The range is empty when the `@` is before the first `/`.
        Some(slash) => reference
            .get(slash..end)
            .and_then(|path| path.rfind(':'))
            .filter(|&i| i > 0)
            .map(|i| slash + i),
    };

    let index = match (colon, at) {
        (None, None) => return (reference, ""),
        (Some(c), Some(a)) if a > 0 && a < c => a,
        (Some(c), _) => c,
        (None, Some(a)) => a,
    };

    reference.split_at(index)
}

#[test]
fn split_references() {
    macro_rules! check {
        ($($reference:expr => ($name:expr, $tag:expr),)*) => {
            $(assert_eq!(split($reference), ($name, $tag), "{}", $reference);)*
        };
    }

    check!(
        "" => ("", ""),
        "repo" => ("repo", ""),
        "repo:v1" => ("repo", ":v1"),
        "repo@sha256:abcd1234" => ("repo", "@sha256:abcd1234"),
        "repo:v1@sha256:abcd1234" => ("repo", ":v1@sha256:abcd1234"),
        "host:5000/repo" => ("host:5000/repo", ""),
        "host:5000/repo:v1" => ("host:5000/repo", ":v1"),
        "host:5000/repo@sha256:abcd1234" => ("host:5000/repo", "@sha256:abcd1234"),
        "host:5000/foo/bar:v1@sha256:abcd1234" => ("host:5000/foo/bar", ":v1@sha256:abcd1234"),
        "foo/bar" => ("foo/bar", ""),
        "foo/bar:latest" => ("foo/bar", ":latest"),
        "foo/bar:{BUILD_TAG}" => ("foo/bar", ":{BUILD_TAG}"),
    );
}

#[test]
fn split_degenerate_references() {
    // Separators at the very start.
    assert_eq!(split(":v1"), ("", ":v1"));
    assert_eq!(split("@sha256:abcd"), ("@sha256", ":abcd"));
    assert_eq!(split("/repo:v1"), ("/repo", ":v1"));

    // `@` before the first `/`.
    assert_eq!(split("repo@sha256/abcd"), ("repo", "@sha256/abcd"));
    assert_eq!(split("a:b@c/d"), ("a:b", "@c/d"));

    // Trailing separators.
    assert_eq!(split("repo:"), ("repo", ":"));
    assert_eq!(split("repo@"), ("repo", "@"));
}

#[test]
fn split_is_lossless() {
    const REFERENCES: &[&str] = &[
        "",
        ":",
        "@",
        "/",
        ":@/",
        "/@:",
        "a@b@c:d",
        "a:b:c/d:e@f:g",
        "registry.example.com:443/ns/app:1.2.3@sha512:ff",
        "ñame:täg",
    ];

    for reference in REFERENCES {
        let (name, tag) = split(reference);
        assert_eq!(format!("{name}{tag}"), *reference);
        assert!(tag.is_empty() || tag.starts_with([':', '@']), "{reference}");
    }
}
