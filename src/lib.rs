//! Split container image references and match them against image names.
//!
//! ```
//! # use image_name::*;
//! assert_eq!(split("localhost:5000/app:v1"), ("localhost:5000/app", ":v1"));
//! assert!(is_image_matched("localhost:5000/app:v1", "localhost:5000/app"));
//! ```

pub mod image;

pub use image::{is_image_matched, split, ImageName, Matcher, MatcherError};
