mod matcher;
mod splitter;

pub use matcher::{is_image_matched, Matcher, MatcherError};
pub use splitter::split;

/// Image reference split in its name and its tag.
///
/// It is a view over the original reference, built with [`split`]:
///
/// * `name` is the reference without the tag or digest. It includes the
///   registry, if any, like `registry.example.com:5000/foo/bar`.
/// * `tag` is the suffix after the name, with its separator (`:` or `@`).
///   It is empty if the reference has no tag nor digest.
///
/// No defaults are added: `debian` is not expanded to
/// `docker.io/library/debian:latest`.
///
/// # Examples
///
/// ```
/// # use image_name::*;
/// const REFERENCE: &str = "registry.example.com:5000/foo/bar:1.23.4@sha256:0123abcd";
///
/// let image = ImageName::from(REFERENCE);
/// assert_eq!(image.name, "registry.example.com:5000/foo/bar");
/// assert_eq!(image.tag, ":1.23.4@sha256:0123abcd");
/// assert_eq!(image.tag_value(), Some("1.23.4"));
/// assert_eq!(image.digest(), Some("sha256:0123abcd"));
/// assert_eq!(image.to_string(), REFERENCE);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageName<'a> {
    /// Image name, with the registry and the repository.
    pub name: &'a str,

    /// Tag and digest, with their separators.
    pub tag: &'a str,
}

impl<'a> ImageName<'a> {
    /// Return the tag without its `:` separator and without the digest,
    /// or `None` if the reference only has a digest or nothing at all.
    ///
    /// # Examples
    ///
    /// ```
    /// # use image_name::*;
    /// assert_eq!(ImageName::from("debian:stable").tag_value(), Some("stable"));
    /// assert_eq!(ImageName::from("debian@sha256:0123").tag_value(), None);
    /// assert_eq!(ImageName::from("debian").tag_value(), None);
    /// ```
    pub fn tag_value(&self) -> Option<&'a str> {
        let tag = self.tag.strip_prefix(':')?;
        Some(tag.rsplit_once('@').map(|(t, _)| t).unwrap_or(tag))
    }

    /// Return the digest after the last `@`, like `sha256:0123`.
    ///
    /// The value is not validated.
    pub fn digest(&self) -> Option<&'a str> {
        self.tag.rsplit_once('@').map(|(_, d)| d)
    }

    /// Return `true` if `matcher` accepts this reference.
    ///
    /// # Examples
    ///
    /// ```
    /// # use image_name::*;
    /// let matcher = Matcher::new("nixos/nix");
    /// assert!(ImageName::from("nixos/nix:2.24").is_match(&matcher));
    /// ```
    pub fn is_match(&self, matcher: &Matcher) -> bool {
        matcher.is_match(&self.to_string())
    }
}

impl<'a> From<&'a str> for ImageName<'a> {
    fn from(reference: &'a str) -> Self {
        let (name, tag) = split(reference);
        ImageName { name, tag }
    }
}

impl std::fmt::Display for ImageName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)?;
        f.write_str(self.tag)
    }
}

#[test]
fn tag_and_digest_values() {
    macro_rules! check {
        ($reference:expr, [ $tag:expr, $digest:expr ]) => {
            let image = ImageName::from($reference);
            assert_eq!(image.tag_value(), $tag, "{}", $reference);
            assert_eq!(image.digest(), $digest, "{}", $reference);
            assert_eq!(image.to_string(), $reference);
        };
    }

    check!("foo", [None, None]);
    check!("foo:1.2", [Some("1.2"), None]);
    check!("foo:", [Some(""), None]);
    check!("foo@sha256:abcd", [None, Some("sha256:abcd")]);
    check!("foo:1.2@sha256:abcd", [Some("1.2"), Some("sha256:abcd")]);
    check!("example.com:5678/foo/bar", [None, None]);
    check!(
        "example.com:5678/foo/bar:1.2.3@sha512:abcd",
        [Some("1.2.3"), Some("sha512:abcd")]
    );
}

#[test]
fn match_image_names() {
    let matcher = Matcher::new("example.com:5678/foo/bar");

    assert!(ImageName::from("example.com:5678/foo/bar:1.2.3").is_match(&matcher));
    assert!(!ImageName::from("example.com:5678/foo/baz:1.2.3").is_match(&matcher));
}
