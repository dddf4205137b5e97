use thiserror::Error;

pub use steg_signal::SignalError;

#[derive(Error, Debug)]
pub enum StegError {
    /// Represents a carrier whose geometry does not fit the scheme, e.g. a width that is not a power of two for FFT
    #[error("Invalid carrier dimension {width}x{height}: {reason}")]
    InvalidDimension {
        width: usize,
        height: usize,
        reason: &'static str,
    },

    /// Represents a compression / bit depth level the scheme does not support
    #[error("Invalid compression level {0}")]
    InvalidCompressionLevel(usize),

    /// Represents a payload that does not fit into the carrier
    #[error("Payload too large: {required} bytes required but the carrier only holds {available}")]
    PayloadTooLarge { required: usize, available: usize },

    /// Represents a decoded length prefix that exceeds what the carrier can hold
    #[error("Capacity exceeded: declared payload of {declared} bytes but the carrier only holds {available}")]
    CapacityExceeded { declared: u64, available: usize },

    /// Represents a decoded length prefix that is zero or inconsistent
    #[error("Invalid message length {0}")]
    InvalidMessageLength(u64),

    /// Represents a failure to reserve memory for a decoded payload
    #[error("Allocation of {0} bytes failed")]
    AllocationFailure(usize),

    /// Represents a block whose coefficient parities do not survive 8 bit quantization
    #[error("Embedding failed: block {block} does not keep its parities after quantization")]
    EmbeddingFailed { block: usize },

    /// Represents a channel whose spectral payload does not survive clamping to 8 bit samples
    #[error("Embedding failed: channel {channel} is too saturated to carry the payload")]
    ChannelSaturated { channel: usize },

    /// Represents a differential extraction without the original cover image
    #[error("Differential extraction requires the original cover image")]
    MissingReference,

    /// Represents an original cover image that does not match the stego image geometry
    #[error("Original cover image does not match the stego image geometry")]
    ReferenceMismatch,

    /// Represents a Hamming codeword stream that is not made of nibble pairs
    #[error("Hamming codeword stream of odd length {0}")]
    OddCodewordCount(usize),

    /// Represents a raw sample buffer that does not match the declared geometry
    #[error("Carrier buffer of {actual} bytes does not match {expected} expected bytes")]
    InvalidCarrierBuffer { expected: usize, actual: usize },

    /// Represents a failure inside the transform library
    #[error(transparent)]
    Signal(#[from] SignalError),

    /// Represents an unsupported carrier media. For example, a text file
    #[error("Media format is not supported")]
    UnsupportedMedia,

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,
}
