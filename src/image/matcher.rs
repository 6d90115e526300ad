use std::fmt;

use regex::Regex;

/// Characters allowed in tags and digest values.
///
/// `{` and `}` are accepted because some build tools emit templated tags,
/// like `app:{STABLE_GIT_COMMIT}`, before the value is resolved.
const TAG_CHARS: &str = "[a-zA-Z0-9_.{}-]";

/// Errors from [`Matcher::try_new`].
#[derive(thiserror::Error, Debug)]
pub enum MatcherError {
    #[error("Invalid image name pattern.")]
    InvalidPattern(#[from] regex::Error),
}

/// Match image references against an image name.
///
/// A reference matches when its name is exactly the target, optionally
/// followed by a tag and then by a `sha256` digest.
///
/// The target is embedded in a regular expression as it is, so it can use
/// regex syntax (like `.*`). Use [`Matcher::literal`] when the target must
/// be compared as plain text.
///
/// If the target is not a valid pattern, the matcher never matches.
///
/// # Examples
///
/// ```
/// # use image_name::Matcher;
/// let matcher = Matcher::new("ghcr.io/foo/bar");
///
/// assert!(matcher.is_match("ghcr.io/foo/bar"));
/// assert!(matcher.is_match("ghcr.io/foo/bar:1.2.3"));
/// assert!(matcher.is_match("ghcr.io/foo/bar:1.2.3@sha256:0123abcd"));
/// assert!(!matcher.is_match("ghcr.io/foo/bar2:1.2.3"));
/// ```
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String"))]
pub struct Matcher {
    target: String,
    pattern: Option<Regex>,
}

impl Matcher {
    /// Build a matcher for `target`.
    ///
    /// An invalid target is not reported. See [`Matcher::try_new`].
    pub fn new(target: impl Into<String>) -> Self {
        let target = target.into();
        let pattern = match compile(&target) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                tracing::debug!(pattern = %target, error = %err, "invalid image name pattern");
                None
            }
        };

        Matcher { target, pattern }
    }

    /// Build a matcher for `target`, or return an error if it can't be
    /// used in a regular expression.
    ///
    /// ```
    /// # use image_name::{Matcher, MatcherError};
    /// assert!(matches!(
    ///     Matcher::try_new("foo/bar["),
    ///     Err(MatcherError::InvalidPattern(_)),
    /// ));
    /// ```
    pub fn try_new(target: impl Into<String>) -> Result<Self, MatcherError> {
        let target = target.into();
        let pattern = compile(&target)?;

        Ok(Matcher {
            target,
            pattern: Some(pattern),
        })
    }

    /// Build a matcher that compares `target` as plain text.
    ///
    /// ```
    /// # use image_name::Matcher;
    /// assert!(Matcher::new("foo.bar").is_match("fooxbar:1"));
    /// assert!(!Matcher::literal("foo.bar").is_match("fooxbar:1"));
    /// ```
    pub fn literal(target: &str) -> Self {
        Matcher::new(regex::escape(target))
    }

    /// Target used to build this matcher.
    ///
    /// For matchers created with [`Matcher::literal`], this is the
    /// escaped value.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Return `false` if the target could not be compiled, in which case
    /// [`Matcher::is_match`] always returns `false`.
    pub fn is_valid(&self) -> bool {
        self.pattern.is_some()
    }

    /// Return `true` if the name in `reference` is the target.
    pub fn is_match(&self, reference: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(reference))
    }
}

impl From<String> for Matcher {
    fn from(target: String) -> Self {
        Matcher::new(target)
    }
}

impl From<&str> for Matcher {
    fn from(target: &str) -> Self {
        Matcher::new(target)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("target", &self.target)
            .field("valid", &self.is_valid())
            .finish()
    }
}

fn compile(target: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        "^{target}(?::{TAG_CHARS}+)?(?:@sha256:{TAG_CHARS}+)?$"
    ))
}

/// Return `true` if the name in `reference` is `target`.
///
/// `reference` can have a tag and a `sha256` digest. An invalid `target`
/// never matches.
///
/// Use [`Matcher`] to check many references against the same target.
///
/// # Examples
///
/// ```
/// # use image_name::is_image_matched;
/// assert!(is_image_matched("nginx:1.25", "nginx"));
/// assert!(is_image_matched("nginx@sha256:0123abcd", "nginx"));
/// assert!(!is_image_matched("nginx-unprivileged:1.25", "nginx"));
/// ```
pub fn is_image_matched(reference: &str, target: &str) -> bool {
    Matcher::new(target).is_match(reference)
}

#[test]
fn match_optional_suffixes() {
    assert!(is_image_matched("repo", "repo"));
    assert!(is_image_matched("repo:v1", "repo"));
    assert!(is_image_matched("repo@sha256:abcd1234", "repo"));
    assert!(is_image_matched("repo:v1@sha256:abcd1234", "repo"));
    assert!(is_image_matched("repo:{BUILD_TAG}", "repo"));
    assert!(is_image_matched("host:5000/foo/repo:1.2.3-rc_1", "host:5000/foo/repo"));
}

#[test]
fn reject_different_names() {
    assert!(!is_image_matched("repo2:v1", "repo"));
    assert!(!is_image_matched("my-repo:v1", "repo"));
    assert!(!is_image_matched("foo/repo:v1", "repo"));
    assert!(!is_image_matched("repo/foo:v1", "repo"));
    assert!(!is_image_matched("", "repo"));
}

#[test]
fn reject_invalid_suffixes() {
    // Empty tag or digest.
    assert!(!is_image_matched("repo:", "repo"));
    assert!(!is_image_matched("repo@sha256:", "repo"));

    // Only sha256 digests are accepted.
    assert!(!is_image_matched("repo@sha512:abcd1234", "repo"));

    // Digest before the tag.
    assert!(!is_image_matched("repo@sha256:abcd1234:v1", "repo"));

    // Characters outside of the tag alphabet.
    assert!(!is_image_matched("repo:v/1", "repo"));
    assert!(!is_image_matched("repo:v 1", "repo"));
}

#[test]
fn target_as_pattern() {
    assert!(is_image_matched("foo/anything:v1", "foo/.*"));
    assert!(is_image_matched("repo1:v1", "repo[0-9]"));
    assert!(!is_image_matched("repoX:v1", "repo[0-9]"));
}

#[test]
fn invalid_target_never_matches() {
    let matcher = Matcher::new("repo[");

    assert!(!matcher.is_valid());
    assert_eq!(matcher.target(), "repo[");

    for reference in ["repo[", "repo[:v1", "repo", ""] {
        assert!(!matcher.is_match(reference), "{reference}");
        assert!(!is_image_matched(reference, "repo["), "{reference}");
    }

    assert!(matches!(
        Matcher::try_new("repo("),
        Err(MatcherError::InvalidPattern(_)),
    ));
}

#[test]
fn literal_target() {
    let matcher = Matcher::literal("registry.example.com/foo+bar");

    assert!(matcher.is_valid());
    assert!(matcher.is_match("registry.example.com/foo+bar:v1"));
    assert!(!matcher.is_match("registryxexample.com/foo+bar:v1"));
    assert!(!matcher.is_match("registry.example.com/fooobar:v1"));

    assert!(Matcher::literal("repo[").is_match("repo[:v1"));
}

#[cfg(feature = "serde")]
#[test]
fn matcher_in_json() {
    #[derive(serde::Deserialize, Debug)]
    struct Policy {
        images: Vec<Matcher>,
    }

    let policy: Policy = serde_json::from_str(r#"{"images": ["nginx", "ghcr.io/foo/.*", "bad["]}"#)
        .unwrap();

    let targets: Vec<_> = policy.images.iter().map(Matcher::target).collect();
    assert_eq!(targets, ["nginx", "ghcr.io/foo/.*", "bad["]);

    assert!(policy.images[0].is_match("nginx:1.25"));
    assert!(policy.images[1].is_match("ghcr.io/foo/bar@sha256:abcd"));
    assert!(!policy.images[2].is_valid());
}
