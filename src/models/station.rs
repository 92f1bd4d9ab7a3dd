use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct StationRecord {
    #[validate(length(min = 1))]
    pub name: String,

    pub station_id: u32,
}

impl StationRecord {
    pub fn new(name: String, station_id: u32) -> Self {
        Self { name, station_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_validation() {
        let station = StationRecord::new("CALGARY INTL A".to_string(), 50430);
        assert!(station.validate().is_ok());
    }

    #[test]
    fn test_empty_name_is_invalid() {
        let station = StationRecord::new(String::new(), 50430);
        assert!(station.validate().is_err());
    }
}
