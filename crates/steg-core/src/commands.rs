use std::path::{Path, PathBuf};

use crate::{CodecOptions, StegError};

pub fn hide(
    image: &Path,
    write_to_file: &Path,
    payload_file: Option<PathBuf>,
    options: CodecOptions,
) -> Result<(), StegError> {
    crate::api::hide::prepare()
        .with_options(options)
        .with_image(image)
        .with_output(write_to_file)
        .use_payload_file(payload_file)
        .execute()
}

pub fn show(
    secret_image: &Path,
    output_file: Option<PathBuf>,
    original_image: Option<PathBuf>,
    length: Option<usize>,
    options: CodecOptions,
) -> Result<Vec<u8>, StegError> {
    crate::api::show::prepare()
        .with_options(options)
        .from_secret_file(secret_image)
        .use_original(original_image)
        .use_length(length)
        .use_output_file(output_file)
        .execute()
}
