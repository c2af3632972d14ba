use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::value::Value;

/// Largest magnitude below which every integer is exact in an `f64`.
const EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Numbers with no fractional part are handed to the serializer as integers,
/// so `1` stays `1` instead of becoming `1.0`.
///
/// Strings hold their JSON escapes undecoded and are handed over as that raw
/// text, so a JSON serializer escapes them a second time: `"a\nb"` is written
/// as `"a\\nb"`. Use `Display` (`{}` or `{:#}`) to write the document back as
/// it was read.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => serialize_number(*n, serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(array) => {
                let mut seq = serializer.serialize_seq(Some(array.len()))?;
                array.iter().try_for_each(|v| seq.serialize_element(v))?;
                seq.end()
            }
            Self::Object(object) => {
                let mut map = serializer.serialize_map(Some(object.len()))?;
                object
                    .iter()
                    .try_for_each(|(k, v)| map.serialize_entry(k, v))?;
                map.end()
            }
        }
    }
}

fn serialize_number<S: Serializer>(n: f64, serializer: S) -> Result<S::Ok, S::Error> {
    let integral = n.fract() == 0.0 && n.abs() < EXACT_INTEGER;

    // -0.0 keeps its sign as a float
    if integral && !(n == 0.0 && n.is_sign_negative()) {
        serializer.serialize_i64(n as i64)
    } else {
        serializer.serialize_f64(n)
    }
}
