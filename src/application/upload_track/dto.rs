/// A file pulled out of the multipart upload body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Parsed, pre-validation upload input. Multipart decoding happens in the
/// handler; everything domain-relevant is validated in the use case.
#[derive(Debug, Clone)]
pub struct UploadTrackInput {
    pub title: String,
    pub bpm: i32,
    pub music_key: String,
    pub description: Option<String>,
    pub for_sale: bool,
    pub price: Option<f64>,
    pub audio: UploadedFile,
    pub cover: Option<UploadedFile>,
}
