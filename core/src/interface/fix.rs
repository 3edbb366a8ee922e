use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    fn parse(field: &str) -> Result<Option<Self>, FixParseError> {
        match field {
            "" => Ok(None),
            "N" => Ok(Some(Hemisphere::North)),
            "S" => Ok(Some(Hemisphere::South)),
            "E" => Ok(Some(Hemisphere::East)),
            "W" => Ok(Some(Hemisphere::West)),
            other => Err(FixParseError::InvalidField {
                field: "hemisphere",
                value: other.to_string(),
            }),
        }
    }
}

/// Last known positioning fix as reported by the receiver. Only the most
/// recent value is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixInfo {
    /// UTC time of the fix, `hhmmss.ss` as sent by the receiver.
    pub utc: String,
    /// Unsigned decimal degrees; the sign lives in `lat_hemisphere`.
    pub latitude: f64,
    pub lat_hemisphere: Option<Hemisphere>,
    pub longitude: f64,
    pub lon_hemisphere: Option<Hemisphere>,
    /// GGA fix-quality indicator, 0 when there is no fix.
    pub quality: u8,
    pub satellites: u8,
    pub hdop: f32,
    pub altitude_m: f32,
    pub geoid_separation_m: f32,
    pub valid: bool,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FixParseError {
    #[error("not a GGA sentence")]
    NotGga,
    #[error("sentence has {0} fields, expected at least 13")]
    Truncated(usize),
    #[error("checksum mismatch: expected {expected:02X}, computed {computed:02X}")]
    Checksum { expected: u8, computed: u8 },
    #[error("invalid {field} field: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

impl FixInfo {
    /// Parses an NMEA `GGA` sentence. The checksum is verified when present.
    pub fn from_gga(sentence: &str) -> Result<Self, FixParseError> {
        let body = sentence.trim().trim_start_matches('$');
        let body = match body.split_once('*') {
            Some((data, checksum)) => {
                let expected = u8::from_str_radix(checksum.trim(), 16).map_err(|_| {
                    FixParseError::InvalidField {
                        field: "checksum",
                        value: checksum.to_string(),
                    }
                })?;
                let computed = data.bytes().fold(0u8, |acc, b| acc ^ b);
                if expected != computed {
                    return Err(FixParseError::Checksum { expected, computed });
                }
                data
            }
            None => body,
        };

        let fields: Vec<&str> = body.split(',').collect();
        if !fields[0].ends_with("GGA") {
            return Err(FixParseError::NotGga);
        }
        if fields.len() < 13 {
            return Err(FixParseError::Truncated(fields.len()));
        }

        let quality: u8 = parse_or_default(fields[6], "quality")?;
        Ok(Self {
            utc: fields[1].to_string(),
            latitude: parse_coordinate(fields[2], "latitude")?,
            lat_hemisphere: Hemisphere::parse(fields[3])?,
            longitude: parse_coordinate(fields[4], "longitude")?,
            lon_hemisphere: Hemisphere::parse(fields[5])?,
            quality,
            satellites: parse_or_default(fields[7], "satellites")?,
            hdop: parse_or_default(fields[8], "hdop")?,
            altitude_m: parse_or_default(fields[9], "altitude")?,
            geoid_separation_m: parse_or_default(fields[11], "geoid separation")?,
            valid: quality > 0,
        })
    }
}

fn parse_or_default<T>(value: &str, field: &'static str) -> Result<T, FixParseError>
where
    T: std::str::FromStr + Default,
{
    if value.is_empty() {
        return Ok(T::default());
    }
    value.parse().map_err(|_| FixParseError::InvalidField {
        field,
        value: value.to_string(),
    })
}

/// NMEA `(d)ddmm.mmmm` to decimal degrees.
fn parse_coordinate(value: &str, field: &'static str) -> Result<f64, FixParseError> {
    let raw: f64 = parse_or_default(value, field)?;
    let degrees = (raw / 100.0).trunc();
    let minutes = raw - degrees * 100.0;
    Ok(degrees + minutes / 60.0)
}
