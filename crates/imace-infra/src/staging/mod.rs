pub mod fs_stager;

pub use fs_stager::{guess_image_mime_type, FsFileStager};
