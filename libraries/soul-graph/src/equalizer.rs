//! Equalizer band layout
//!
//! An ordered frequency -> gain mapping. Entry order is significant: it
//! decides which stage becomes a shelf and which a peak, and the order of
//! the derived Q values.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One equalizer entry
///
/// Equality treats NaN as equal to NaN, so unchanged props compare equal.
#[derive(Debug, Clone, Copy)]
pub struct EqualizerBand {
    /// Center frequency in Hz
    pub frequency: f32,
    /// Gain in dB
    pub gain_db: f32,
}

impl PartialEq for EqualizerBand {
    fn eq(&self, other: &Self) -> bool {
        same_value(self.frequency, other.frequency) && same_value(self.gain_db, other.gain_db)
    }
}

fn same_value(a: f32, b: f32) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Ordered frequency (Hz) -> gain (dB) mapping with unique frequencies
///
/// Frequencies are expected to be positive and, for visualization, ascending.
/// Neither is enforced here; the serde impl is the only place keys are checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EqualizerSpec {
    bands: Vec<EqualizerBand>,
}

impl EqualizerSpec {
    /// Create an empty equalizer
    pub fn new() -> Self {
        Self { bands: Vec::new() }
    }

    /// Build from `(frequency, gain_db)` pairs
    ///
    /// A repeated frequency overwrites the gain of its first occurrence and
    /// keeps that position.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        let mut spec = Self::new();
        for (frequency, gain_db) in pairs {
            spec.insert(frequency, gain_db);
        }
        spec
    }

    /// Insert or overwrite a band
    pub fn insert(&mut self, frequency: f32, gain_db: f32) {
        if let Some(band) = self.bands.iter_mut().find(|b| b.frequency == frequency) {
            band.gain_db = gain_db;
        } else {
            self.bands.push(EqualizerBand { frequency, gain_db });
        }
    }

    /// Bands in iteration order
    pub fn iter(&self) -> impl Iterator<Item = &EqualizerBand> {
        self.bands.iter()
    }

    /// Bands as a slice
    pub fn bands(&self) -> &[EqualizerBand] {
        &self.bands
    }

    /// Center frequencies in iteration order
    pub fn frequencies(&self) -> Vec<f32> {
        self.bands.iter().map(|b| b.frequency).collect()
    }

    /// Gains in iteration order
    pub fn gains(&self) -> Vec<f32> {
        self.bands.iter().map(|b| b.gain_db).collect()
    }

    /// Number of bands
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Check if there are no bands
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Check if `other` has the same frequencies in the same order
    ///
    /// Gains are ignored. A reordering of identical keys is a different layout.
    pub fn same_bands(&self, other: &EqualizerSpec) -> bool {
        self.bands.len() == other.bands.len()
            && self
                .bands
                .iter()
                .zip(&other.bands)
                .all(|(a, b)| same_value(a.frequency, b.frequency))
    }
}

impl FromIterator<(f32, f32)> for EqualizerSpec {
    fn from_iter<I: IntoIterator<Item = (f32, f32)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl Serialize for EqualizerSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.bands.len()))?;
        for band in &self.bands {
            map.serialize_entry(&band.frequency.to_string(), &band.gain_db)?;
        }
        map.end()
    }
}

struct EqualizerVisitor;

impl<'de> Visitor<'de> for EqualizerVisitor {
    type Value = EqualizerSpec;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of frequency (Hz) to gain (dB)")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut spec = EqualizerSpec::new();
        // Document order is the stage order
        while let Some((key, gain_db)) = access.next_entry::<String, f32>()? {
            let frequency = parse_frequency(&key).map_err(de::Error::custom)?;
            spec.insert(frequency, gain_db);
        }
        Ok(spec)
    }
}

impl<'de> Deserialize<'de> for EqualizerSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EqualizerVisitor)
    }
}

fn parse_frequency(key: &str) -> crate::Result<f32> {
    match key.trim().parse::<f32>() {
        Ok(f) if f.is_finite() && f > 0.0 => Ok(f),
        _ => Err(crate::GraphError::InvalidFrequency(key.to_string())),
    }
}
