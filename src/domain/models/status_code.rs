#[cfg(test)]
#[path = "status_code_test.rs"]
mod tests;

use std::fmt;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Every status code http.dog has a picture for. Grouped by hundreds,
/// ascending within each group. Matching results keep this ordering.
#[rustfmt::skip]
pub const REFERENCE_CODES: [u16; 61] = [
    100, 101, 102,
    200, 201, 202, 203, 204, 205, 206, 207, 208, 226,
    300, 301, 302, 303, 304, 305, 307, 308,
    400, 401, 402, 403, 404, 405, 406, 407, 408, 409, 410, 411,
    412, 413, 414, 415, 416, 417, 418, 421, 422, 423, 424,
    425, 426, 428, 429, 431, 451,
    500, 501, 502, 503, 504, 505, 506, 507, 508, 510, 511,
];

const IMAGE_URL_BASE: &str = "https://http.dog";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub fn reference() -> Vec<StatusCode> {
        return REFERENCE_CODES
            .iter()
            .map(|code| return StatusCode(*code))
            .collect();
    }

    pub fn is_known(&self) -> bool {
        return REFERENCE_CODES.contains(&self.0);
    }

    pub fn image_url(&self) -> String {
        return format!("{IMAGE_URL_BASE}/{}.jpg", self.0);
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "{}", self.0);
    }
}

pub fn image_urls(codes: &[StatusCode]) -> Vec<String> {
    return codes.iter().map(|code| return code.image_url()).collect();
}
