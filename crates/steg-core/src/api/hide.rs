use std::io::Read;
use std::path::{Path, PathBuf};

use log::info;

use crate::media::{self, Persist};
use crate::{CodecOptions, StegError};

pub fn prepare() -> HideApi {
    HideApi::default()
}

/// Where the payload comes from.
#[derive(Debug, Default)]
enum PayloadSource {
    #[default]
    Stdin,
    File(PathBuf),
    Bytes(Vec<u8>),
}

#[derive(Default, Debug)]
pub struct HideApi {
    payload: PayloadSource,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    options: CodecOptions,
}

impl HideApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = PayloadSource::Bytes(payload.into());
        self
    }

    pub fn with_payload_file<A: AsRef<Path>>(mut self, payload_file: A) -> Self {
        self.payload = PayloadSource::File(payload_file.as_ref().to_path_buf());
        self
    }

    /// Read the payload from this file.
    /// If `None` is passed, the payload is read from standard input
    pub fn use_payload_file(mut self, payload_file: Option<PathBuf>) -> Self {
        self.payload = match payload_file {
            Some(file) => PayloadSource::File(file),
            None => PayloadSource::Stdin,
        };
        self
    }

    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    pub fn execute(self) -> Result<(), StegError> {
        let Some(image) = self.image else {
            return Err(StegError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(StegError::TargetNotSet);
        };

        let payload = match self.payload {
            PayloadSource::Bytes(bytes) => bytes,
            PayloadSource::File(file) => {
                std::fs::read(file).map_err(|source| StegError::ReadError { source })?
            }
            PayloadSource::Stdin => {
                let mut buf = Vec::new();
                std::io::stdin()
                    .read_to_end(&mut buf)
                    .map_err(|source| StegError::ReadError { source })?;
                buf
            }
        };

        let mut carrier = media::load_carrier(&image)?;
        super::conceal(&mut carrier, &payload, &self.options)?;
        carrier.save_as(&output)?;
        info!("{} bytes hidden in {output:?}", payload.len());

        Ok(())
    }
}
