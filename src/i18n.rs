//! 面向用户的消息目录 — 错误提示与诊断文本的多语言版本
//!
//! User-facing message catalog. Log output stays English; anything returned to the
//! caller goes through a [`Locale`].

use std::fmt;
use std::str::FromStr;

/// Locale of user-facing messages.
///
/// `Id` (Bahasa Indonesia) is the product's original audience and the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    Id,
    En,
}

/// Keys of the message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    MissingCredential,
    CheckCredential,
    EmptyCatalog,
    NoEligibleModel,
    EmptyResponse,
    Timeout,
    Transport,
    InvalidRequest,
    RecoveryFailed,
    FailurePrefix,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Id => "id",
            Locale::En => "en",
        }
    }

    pub fn text(&self, key: MessageKey) -> &'static str {
        match self {
            Locale::Id => match key {
                MessageKey::MissingCredential => {
                    "API Key tidak ditemukan. Mohon masukkan API Key Anda di kolom input atas."
                }
                MessageKey::CheckCredential => "Gagal cek model (Cek API Key Anda)",
                MessageKey::EmptyCatalog => "API Key valid tapi tidak ada model yang tersedia.",
                MessageKey::NoEligibleModel => {
                    "Tidak ditemukan model yang mendukung 'generateContent' di akun ini."
                }
                MessageKey::EmptyResponse => "Model tidak mengembalikan jawaban (kandidat kosong).",
                MessageKey::Timeout => "Layanan model tidak merespons dalam batas waktu",
                MessageKey::Transport => "Gagal menghubungi layanan model",
                MessageKey::InvalidRequest => "Format permintaan tidak valid",
                MessageKey::RecoveryFailed => {
                    "Maaf, AI terlalu kreatif dan merusak format JSON. Silakan coba lagi."
                }
                MessageKey::FailurePrefix => "Gagal",
            },
            Locale::En => match key {
                MessageKey::MissingCredential => {
                    "API key not found. Please enter your API key in the input field above."
                }
                MessageKey::CheckCredential => "Model lookup failed (check your API key)",
                MessageKey::EmptyCatalog => "API key is valid but no models are available.",
                MessageKey::NoEligibleModel => {
                    "No model supporting 'generateContent' was found for this account."
                }
                MessageKey::EmptyResponse => "The model returned no candidates.",
                MessageKey::Timeout => "The model service did not respond in time",
                MessageKey::Transport => "Could not reach the model service",
                MessageKey::InvalidRequest => "Malformed request",
                MessageKey::RecoveryFailed => {
                    "Sorry, the AI got too creative and broke the JSON format. Please try again."
                }
                MessageKey::FailurePrefix => "Failed",
            },
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" | "id-id" | "indonesian" => Ok(Locale::Id),
            "en" | "en-us" | "en-gb" | "english" => Ok(Locale::En),
            other => Err(format!("Unknown locale: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_str() {
        assert_eq!("id".parse::<Locale>().unwrap(), Locale::Id);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(" en-US ".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_default_locale_is_indonesian() {
        assert_eq!(Locale::default(), Locale::Id);
        assert_eq!(Locale::default().text(MessageKey::FailurePrefix), "Gagal");
    }
}
