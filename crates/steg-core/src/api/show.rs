use std::path::{Path, PathBuf};

use log::info;

use crate::{media, CodecOptions, StegError};

pub fn prepare() -> ShowApi {
    ShowApi::default()
}

#[derive(Default, Debug)]
pub struct ShowApi {
    secret_image: Option<PathBuf>,
    original_image: Option<PathBuf>,
    output: Option<PathBuf>,
    length: Option<usize>,
    options: CodecOptions,
}

impl ShowApi {
    /// Use the given codec options
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// This is the stego image that contains the payload
    pub fn from_secret_file(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_image = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// The untouched cover image, needed by the differential FFT variant
    pub fn with_original(mut self, original: impl AsRef<Path>) -> Self {
        self.original_image = Some(original.as_ref().to_path_buf());
        self
    }

    pub fn use_original(mut self, original: Option<PathBuf>) -> Self {
        self.original_image = original;
        self
    }

    /// Number of payload bytes, for schemes that do not store it
    pub fn use_length(mut self, length: Option<usize>) -> Self {
        self.length = length;
        self
    }

    /// Also write the payload into this file
    pub fn into_output_file(mut self, output: impl AsRef<Path>) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    pub fn use_output_file(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    /// Execute the extraction and return the payload
    pub fn execute(self) -> Result<Vec<u8>, StegError> {
        let Some(secret_image) = self.secret_image else {
            return Err(StegError::CarrierNotSet);
        };

        let carrier = media::load_carrier(&secret_image)?;
        let original = self
            .original_image
            .as_deref()
            .map(media::load_carrier)
            .transpose()?;
        let payload = super::reveal(&carrier, &self.options, original, self.length)?;

        if let Some(output) = self.output {
            std::fs::write(&output, &payload).map_err(|source| StegError::WriteError { source })?;
            info!("{} bytes written to {output:?}", payload.len());
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::media::{CodecOptions, DctCodecOptions, FftCodecOptions};
    use crate::media::Persist;
    use crate::{Carrier, StegError};

    fn cover(dir: &std::path::Path) -> std::path::PathBuf {
        let file = dir.join("cover.png");
        Carrier::from_fn(64, 64, 3, |x, y, c| (96 + (x * 3 + y * 5 + c * 7) % 64) as u8)
            .save_as(&file)
            .expect("Failed to write cover image");
        file
    }

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let options = CodecOptions::Dct(DctCodecOptions::default());
        let secret = temp_dir.path().join("secret.png");

        crate::api::hide::prepare()
            .with_options(options.clone())
            .with_payload("Hello World")
            .with_image(cover(temp_dir.path()))
            .with_output(&secret)
            .execute()
            .expect("Failed to hide message in image");

        let payload = crate::api::show::prepare()
            .with_options(options)
            .from_secret_file(&secret)
            .into_output_file(temp_dir.path().join("secret-message.txt"))
            .execute()
            .expect("Failed to show message from image");

        assert_eq!(payload, b"Hello World");
        assert_eq!(
            std::fs::read(temp_dir.path().join("secret-message.txt")).unwrap(),
            b"Hello World"
        );
    }

    #[test]
    fn differential_show_should_load_the_original() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let options = CodecOptions::Fft(FftCodecOptions::default());
        let original = cover(temp_dir.path());
        let secret = temp_dir.path().join("secret.png");

        crate::api::hide::prepare()
            .with_options(options.clone())
            .with_payload([120u8, 60])
            .with_image(&original)
            .with_output(&secret)
            .execute()
            .expect("Failed to hide samples in image");

        let payload = crate::api::show::prepare()
            .with_options(options)
            .from_secret_file(&secret)
            .with_original(&original)
            .use_length(Some(2))
            .execute()
            .expect("Failed to show samples from image");

        assert!(payload[0].abs_diff(120) <= 2);
        assert!(payload[1].abs_diff(60) <= 2);
    }

    #[test]
    fn should_require_the_secret_image() {
        assert!(matches!(
            crate::api::show::prepare().execute(),
            Err(StegError::CarrierNotSet)
        ));
    }
}
