use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier handed out to a car by the traffic light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarId(pub u64);

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Car descriptor sent along with queue and pass requests.
/// Only `car_id` matters to the intersection; the rest is for the logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDesc {
    pub car_id: CarId,
    /// Registration plate, e.g. "KLM 042".
    pub car_number: String,
    pub driver_name_surname: String,
}

impl CarDesc {
    pub fn new(car_id: CarId, car_number: impl Into<String>, driver: impl Into<String>) -> Self {
        Self {
            car_id,
            car_number: car_number.into(),
            driver_name_surname: driver.into(),
        }
    }
}

impl fmt::Display for CarDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Car {}, RegNr. {}, Driver {}",
            self.car_id, self.car_number, self.driver_name_surname
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn car_desc_uses_camel_case_fields() {
        let car = CarDesc::new(CarId(7), "ABC 123", "John Johnson");
        let json = serde_json::to_value(&car).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "carId": 7,
                "carNumber": "ABC 123",
                "driverNameSurname": "John Johnson"
            })
        );
    }

    #[test]
    fn display_matches_log_format() {
        let car = CarDesc::new(CarId(3), "XYZ 999", "Jack Jackson");
        assert_eq!(car.to_string(), "Car 3, RegNr. XYZ 999, Driver Jack Jackson");
    }
}
