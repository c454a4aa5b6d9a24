use thiserror::Error;

use crate::data::{
    Accident, DtpResponse, EaistoResponse, Fine, FinesResponse, GibddResponse, Inquiry,
    InspectionRecord, OwnershipPeriod, ReportParts, RestrictResponse, Restriction, Vehicle,
    VehiclePassport, VinReport, WantedRecord, WantedResponse,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MockError {
    #[error("Mock code must be from 1 to 5")]
    InvalidCode(i32),
}

/// Which blocks of a mocked report carry data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub restriction: bool,
    pub wanted: bool,
    pub accidents: bool,
    pub fines: bool,
    pub inspection: bool,
    pub owners: usize,
}

impl Scenario {
    /// Looks up one of the five fixed demo scenarios.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::InvalidCode`] for anything outside `1..=5`.
    pub fn from_code(code: i32) -> Result<Self, MockError> {
        let (restriction, wanted, accidents, fines, inspection, owners) = match code {
            1 => (true, true, true, true, true, 2),
            2 => (false, false, false, false, false, 1),
            3 => (true, false, true, false, true, 3),
            4 => (false, true, false, true, false, 4),
            5 => (true, true, false, false, false, 5),
            _ => return Err(MockError::InvalidCode(code)),
        };

        Ok(Self {
            restriction,
            wanted,
            accidents,
            fines,
            inspection,
            owners,
        })
    }
}

/// Builds a report with plausible, hard-coded content for demo purposes. Nothing is fetched.
///
/// # Errors
///
/// Returns [`MockError::InvalidCode`] if `code` is not one of the five scenarios.
pub fn mock_report(code: i32) -> Result<VinReport, MockError> {
    let scenario = Scenario::from_code(code)?;
    Ok(VinReport::assemble(scenario.parts()))
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// One record if `present`, none otherwise.
fn records<T>(present: bool, record: impl FnOnce() -> T) -> Vec<T> {
    if present {
        vec![record()]
    } else {
        Vec::new()
    }
}

impl Scenario {
    fn parts(&self) -> ReportParts {
        ReportParts {
            gibdd: Some(self.gibdd()),
            restrict: Some(RestrictResponse {
                status: 200,
                found: self.restriction,
                restrictions: records(self.restriction, || Restriction {
                    osn: text("Запрет"),
                    ogrkod: text("001"),
                    regname: text("ГУ МВД"),
                    ogrdate: text("01.05.2024"),
                }),
            }),
            gibddv2: None,
            wanted: Some(WantedResponse {
                status: 200,
                found: self.wanted,
                records: records(self.wanted, || WantedRecord {
                    regname: text("ГУ МВД"),
                    reason: text("Хищение"),
                    date: text("01.04.2023"),
                }),
            }),
            dtp: Some(DtpResponse {
                status: 200,
                found: self.accidents,
                accidents: records(self.accidents, || Accident {
                    date: text("10.12.2022"),
                    region: text("МОСКВА"),
                    accident_type: text("столкновение"),
                    damage: text("задняя часть"),
                }),
            }),
            fines: Some(FinesResponse {
                status: 200,
                found: self.fines,
                fines: records(self.fines, || Fine {
                    article: text("12.9 ч.2"),
                    date: text("01.05.2024"),
                    number: text("1888888888888"),
                    amount: 1500.0,
                    status: text("неоплачен"),
                }),
            }),
            eaisto: Some(EaistoResponse {
                status: 200,
                found: self.inspection,
                records: records(self.inspection, || InspectionRecord {
                    date: text("01.01.2024"),
                    result: text("пройден"),
                    odometer: text("123456"),
                    station: text("СТО МОК"),
                }),
            }),
        }
    }

    fn gibdd(&self) -> GibddResponse {
        GibddResponse {
            status: 200,
            found: true,
            utilicazia: 0,
            utilicaziainfo: text(""),
            vehicle: Some(Vehicle {
                vin: text("MOCKVINCODE123456"),
                body_number: text("MOCKBODY123456"),
                engine_number: text("MOCKENG1234"),
                model: text("MockCar 2025"),
                color: text("ЧЕРНЫЙ"),
                year: text("2025"),
                engine_volume: text("2000.0"),
                power_hp: text("150.0"),
                power_kwt: text("110.3"),
                category: text("B"),
                vehicle_type: text("21"),
                typeinfo: text("Легковой универсал"),
            }),
            vehicle_passport: Some(VehiclePassport {
                number: text("MOCKPTS1234"),
                issue: text("МОК ТАМОЖНЯ"),
            }),
            ownership_period: (0..self.owners).map(|i| self.ownership(i)).collect(),
            inquiry: Some(Inquiry {
                price: 0.8,
                balance: 9999.99,
                credit: text("0.00"),
                speed: 1,
                attempts: 1,
            }),
        }
    }

    /// The owners follow each other yearly, the last one still holds the vehicle.
    fn ownership(&self, index: usize) -> OwnershipPeriod {
        let to = if index + 1 < self.owners {
            Some(format!("01.01.202{}", index + 1))
        } else {
            None
        };

        OwnershipPeriod {
            last_operation: text("03"),
            last_operation_info: text("Изменение собственника"),
            simple_person_type: text("Natural"),
            simple_person_type_info: text("Физическое лицо"),
            from: Some(format!("01.01.202{index}")),
            to,
            period: text("1 год"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1, true, true, true, true, true, 2)]
    #[case(2, false, false, false, false, false, 1)]
    #[case(3, true, false, true, false, true, 3)]
    #[case(4, false, true, false, true, false, 4)]
    #[case(5, true, true, false, false, false, 5)]
    fn derived_fields_match_scenario(
        #[case] code: i32,
        #[case] restriction: bool,
        #[case] wanted: bool,
        #[case] accidents: bool,
        #[case] fines: bool,
        #[case] inspection: bool,
        #[case] owners: usize,
    ) {
        let report = mock_report(code).unwrap();

        assert_eq!(report.has_restriction, restriction);
        assert_eq!(report.is_wanted, wanted);
        assert_eq!(report.has_accidents, accidents);
        assert_eq!(report.has_fines, fines);
        assert_eq!(report.owners_count, owners);
        assert_eq!(report.fines_amount, if fines { 1500.0 } else { 0.0 });

        let eaisto = report.eaisto.unwrap();
        assert_eq!(eaisto.found, inspection);
        assert_eq!(eaisto.records.len(), usize::from(inspection));
        assert_eq!(report.restrict.unwrap().found, restriction);
        assert!(report.gibddv2.is_none());
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(-1)]
    #[case(i32::MAX)]
    fn unknown_codes_are_rejected(#[case] code: i32) {
        assert_eq!(mock_report(code), Err(MockError::InvalidCode(code)));
    }

    #[test]
    fn ownership_periods_chain_together() {
        let report = mock_report(3).unwrap();
        let periods = report.gibdd.unwrap().ownership_period;

        let spans: Vec<(Option<&str>, Option<&str>)> = periods
            .iter()
            .map(|p| (p.from.as_deref(), p.to.as_deref()))
            .collect();
        assert_eq!(
            spans,
            vec![
                (Some("01.01.2020"), Some("01.01.2021")),
                (Some("01.01.2021"), Some("01.01.2022")),
                (Some("01.01.2022"), None),
            ]
        );
    }

    #[test]
    fn single_owner_is_current() {
        let report = mock_report(2).unwrap();
        let periods = report.gibdd.unwrap().ownership_period;
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].to, None);
    }

    #[test]
    fn mock_vehicle_is_fixed() {
        let vehicle = mock_report(1).unwrap().gibdd.unwrap().vehicle.unwrap();
        assert_eq!(vehicle.vin.as_deref(), Some("MOCKVINCODE123456"));
        assert_eq!(vehicle.model.as_deref(), Some("MockCar 2025"));
    }

    #[test]
    fn error_message_names_the_range() {
        assert_eq!(
            MockError::InvalidCode(9).to_string(),
            "Mock code must be from 1 to 5"
        );
    }
}
