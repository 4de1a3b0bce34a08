//! Filesystem artifact storage for Deckhand.
//!
//! Each completed generation gets its own directory under the storage root:
//!
//! ```text
//! public/logs/
//! └── 2024-07-19T18-04-05.123Z-the-habits-of-wealthy-chimpanzees/
//!     ├── topic.txt
//!     ├── images/
//!     │   ├── image_1.png
//!     │   └── image_2.png
//!     └── slides.json
//! ```
//!
//! `slides.json` is written last, through a temporary file and a rename, so a
//! directory without it is an unfinished or failed write and never shows up
//! in listings.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod key;
mod manifest;

pub use filesystem::FileSystemArtifactStore;
pub use key::{GenerationKey, MAX_SLUG_BYTES, kebab_case};
pub use manifest::{Manifest, StoredImage, StoredSlide};
