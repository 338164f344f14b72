//! ItemStatus Value Object

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Posting status: was the item lost by the poster, or found by them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i16)]
pub enum ItemStatus {
    Lost = 0,
    Found = 1,
}

impl ItemStatus {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            ItemStatus::Lost => "lost",
            ItemStatus::Found => "found",
        }
    }

    #[inline]
    pub fn from_id(id: i16) -> Self {
        match id {
            0 => ItemStatus::Lost,
            1 => ItemStatus::Found,
            _ => {
                tracing::error!("Invalid ItemStatus id: {}", id);
                unreachable!("Invalid ItemStatus id: {}", id)
            }
        }
    }

    /// Parse a status code from untrusted wire input
    #[inline]
    pub fn parse(code: &str) -> AppResult<Self> {
        match code {
            "lost" => Ok(ItemStatus::Lost),
            "found" => Ok(ItemStatus::Found),
            _ => Err(AppError::bad_request(
                "Status must be either 'lost' or 'found'",
            )),
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_status_ids() {
        assert_eq!(ItemStatus::Lost.id(), 0);
        assert_eq!(ItemStatus::Found.id(), 1);
        assert_eq!(ItemStatus::from_id(0), ItemStatus::Lost);
        assert_eq!(ItemStatus::from_id(1), ItemStatus::Found);
    }

    #[test]
    fn test_item_status_parse() {
        assert_eq!(ItemStatus::parse("lost").unwrap(), ItemStatus::Lost);
        assert_eq!(ItemStatus::parse("found").unwrap(), ItemStatus::Found);
        assert!(ItemStatus::parse("misplaced").is_err());
        assert!(ItemStatus::parse("LOST").is_err());
    }

    #[test]
    fn test_item_status_display() {
        assert_eq!(ItemStatus::Lost.to_string(), "lost");
        assert_eq!(ItemStatus::Found.to_string(), "found");
    }
}
