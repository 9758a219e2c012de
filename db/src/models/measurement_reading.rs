use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One pollutant reading row. Rows belong to a measurement and carry a
/// `position` column so the submitted order survives storage.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "measurement_readings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub measurement_id: i64,
    pub position: i32,

    pub pollutant: Pollutant,
    pub value: f64,
    pub unit: Unit,
    pub averaging_period: AveragingPeriod,
    pub quality_flag: QualityFlag,
}

/// Pollutant names as they appear on the wire and in the database.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Pollutant {
    #[sea_orm(string_value = "PM2.5")]
    #[serde(rename = "PM2.5")]
    #[strum(serialize = "PM2.5")]
    Pm25,

    #[sea_orm(string_value = "PM10")]
    #[serde(rename = "PM10")]
    #[strum(serialize = "PM10")]
    Pm10,

    #[sea_orm(string_value = "Temperature")]
    #[serde(rename = "Temperature")]
    #[strum(serialize = "Temperature")]
    Temperature,

    #[sea_orm(string_value = "Humidity")]
    #[serde(rename = "Humidity")]
    #[strum(serialize = "Humidity")]
    Humidity,

    #[sea_orm(string_value = "Pressure")]
    #[serde(rename = "Pressure")]
    #[strum(serialize = "Pressure")]
    Pressure,

    #[sea_orm(string_value = "Air Quality Index")]
    #[serde(rename = "Air Quality Index")]
    #[strum(serialize = "Air Quality Index")]
    AirQualityIndex,

    #[sea_orm(string_value = "NO2")]
    #[serde(rename = "NO2")]
    #[strum(serialize = "NO2")]
    No2,

    #[sea_orm(string_value = "SO2")]
    #[serde(rename = "SO2")]
    #[strum(serialize = "SO2")]
    So2,

    #[sea_orm(string_value = "CO")]
    #[serde(rename = "CO")]
    #[strum(serialize = "CO")]
    Co,

    #[sea_orm(string_value = "O3")]
    #[serde(rename = "O3")]
    #[strum(serialize = "O3")]
    O3,
}

/// Measurement units. String values match the upstream SaveEcoBot feed,
/// including its spelling of "Celcius".
#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Unit {
    #[sea_orm(string_value = "ug/m3")]
    #[serde(rename = "ug/m3")]
    #[strum(serialize = "ug/m3")]
    MicrogramsPerCubicMeter,

    #[sea_orm(string_value = "Celcius")]
    #[serde(rename = "Celcius")]
    #[strum(serialize = "Celcius")]
    Celsius,

    #[sea_orm(string_value = "%")]
    #[serde(rename = "%")]
    #[strum(serialize = "%")]
    Percent,

    #[sea_orm(string_value = "hPa")]
    #[serde(rename = "hPa")]
    #[strum(serialize = "hPa")]
    Hectopascal,

    #[sea_orm(string_value = "aqi")]
    #[serde(rename = "aqi")]
    #[strum(serialize = "aqi")]
    Aqi,

    #[sea_orm(string_value = "mg/m3")]
    #[serde(rename = "mg/m3")]
    #[strum(serialize = "mg/m3")]
    MilligramsPerCubicMeter,

    #[sea_orm(string_value = "ppm")]
    #[serde(rename = "ppm")]
    #[strum(serialize = "ppm")]
    PartsPerMillion,
}

#[derive(
    Debug, Clone, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString,
    Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum AveragingPeriod {
    #[sea_orm(string_value = "1 minute")]
    #[serde(rename = "1 minute")]
    #[strum(serialize = "1 minute")]
    OneMinute,

    #[default]
    #[sea_orm(string_value = "2 minutes")]
    #[serde(rename = "2 minutes")]
    #[strum(serialize = "2 minutes")]
    TwoMinutes,

    #[sea_orm(string_value = "5 minutes")]
    #[serde(rename = "5 minutes")]
    #[strum(serialize = "5 minutes")]
    FiveMinutes,

    #[sea_orm(string_value = "15 minutes")]
    #[serde(rename = "15 minutes")]
    #[strum(serialize = "15 minutes")]
    FifteenMinutes,

    #[sea_orm(string_value = "1 hour")]
    #[serde(rename = "1 hour")]
    #[strum(serialize = "1 hour")]
    OneHour,

    #[sea_orm(string_value = "24 hours")]
    #[serde(rename = "24 hours")]
    #[strum(serialize = "24 hours")]
    TwentyFourHours,
}

#[derive(
    Debug, Clone, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString,
    Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QualityFlag {
    #[sea_orm(string_value = "valid")]
    Valid,

    #[sea_orm(string_value = "invalid")]
    Invalid,

    #[sea_orm(string_value = "estimated")]
    Estimated,

    #[default]
    #[sea_orm(string_value = "preliminary")]
    Preliminary,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::measurement::Entity",
        from = "Column::MeasurementId",
        to = "super::measurement::Column::Id",
        on_delete = "Cascade"
    )]
    Measurement,
}

impl Related<super::measurement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Measurement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
