//! Station metric sensors.
//! Display metadata of the metrics published to Home Assistant.
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

const ENTITY_PREFIX: &str = "sensor.kstar_solar_";
const NAME_PREFIX: &str = "Kstar Solar";

/// A metric of the station detail, serialized as its portal field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum StationMetric {
    RealPower,
    DayGeneration,
    MonthGeneration,
    YearGeneration,
    TotalGeneration,
    DayEarn,
    TotalEarn,
    Co2,
    Coal,
    Forest,
}

/// How a metric is presented in Home Assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorDescriptor {
    pub object_id: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
    pub device_class: &'static str,
    pub state_class: &'static str,
    pub icon: &'static str,
}

impl StationMetric {
    /// Field name in the station detail payload.
    pub fn key(&self) -> &'static str {
        self.into()
    }

    pub fn entity_id(&self) -> String {
        format!("{ENTITY_PREFIX}{}", self.descriptor().object_id)
    }

    pub fn friendly_name(&self) -> String {
        format!("{NAME_PREFIX} {}", self.descriptor().name)
    }

    pub fn descriptor(&self) -> SensorDescriptor {
        match self {
            StationMetric::RealPower => SensorDescriptor {
                object_id: "real_power",
                name: "Real Power",
                unit: "W",
                device_class: "power",
                state_class: "measurement",
                icon: "mdi:solar-power",
            },
            StationMetric::DayGeneration => Self::energy("day_generation", "Day Generation", "mdi:solar-panel"),
            StationMetric::MonthGeneration => {
                Self::energy("month_generation", "Month Generation", "mdi:solar-panel-large")
            }
            StationMetric::YearGeneration => {
                Self::energy("year_generation", "Year Generation", "mdi:solar-panel-large")
            }
            StationMetric::TotalGeneration => {
                Self::energy("total_generation", "Total Generation", "mdi:solar-panel-large")
            }
            StationMetric::DayEarn => Self::earnings("day_earn", "Day Earnings"),
            StationMetric::TotalEarn => Self::earnings("total_earn", "Total Earnings"),
            StationMetric::Co2 => SensorDescriptor {
                object_id: "co2",
                name: "CO2 Reduction",
                unit: "kg",
                device_class: "weight",
                state_class: "total",
                icon: "mdi:molecule-co2",
            },
            StationMetric::Coal => SensorDescriptor {
                object_id: "coal",
                name: "Coal Saved",
                unit: "kg",
                device_class: "weight",
                state_class: "total",
                icon: "mdi:fire",
            },
            StationMetric::Forest => SensorDescriptor {
                object_id: "forest",
                name: "Forest Area",
                unit: "m²",
                device_class: "area",
                state_class: "total",
                icon: "mdi:tree",
            },
        }
    }

    fn energy(object_id: &'static str, name: &'static str, icon: &'static str) -> SensorDescriptor {
        SensorDescriptor {
            object_id,
            name,
            unit: "kWh",
            device_class: "energy",
            state_class: "total_increasing",
            icon,
        }
    }

    fn earnings(object_id: &'static str, name: &'static str) -> SensorDescriptor {
        SensorDescriptor {
            object_id,
            name,
            unit: "CNY",
            device_class: "monetary",
            state_class: "total",
            icon: "mdi:currency-cny",
        }
    }
}
