/// Parameters of a preference-center QR code image.
///
/// `parameters` are appended to the image URL in order after the fixed
/// query fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceQrRequest {
    pub organization_code: String,
    pub property_code: String,
    pub environment_code: String,
    pub image_size: Option<u32>,
    pub path: Option<String>,
    pub background_color: Option<String>,
    pub foreground_color: Option<String>,
    pub parameters: Vec<(String, String)>,
}
