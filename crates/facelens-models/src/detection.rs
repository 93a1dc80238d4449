//! Face detection response types.
//!
//! These mirror the JSON returned by the remote face-analysis service. The
//! optional attributes (beauty, ethnicity) are modelled as `Option` so that
//! presence is decided once, at parse time.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Attributes requested from the detection service, in request order.
pub const RETURN_ATTRIBUTES: &str = "age,gender,smiling,emotion,headpose,beauty,ethnicity";

/// Parsed detection response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResponse {
    /// Detected faces, in service order
    pub faces: Vec<FaceRecord>,
    /// Service request identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Service image identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    /// Service-side processing time in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_used: Option<u64>,
}

impl DetectionResponse {
    /// Create a response holding only faces.
    pub fn from_faces(faces: Vec<FaceRecord>) -> Self {
        Self {
            faces,
            request_id: None,
            image_id: None,
            time_used: None,
        }
    }

    /// Parse a response body.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    /// Number of detected faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether the service found no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// One detected face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceRecord {
    /// Opaque service token for the face
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_token: Option<String>,
    /// Face location in the submitted image
    pub face_rectangle: FaceRectangle,
    /// Analysed attributes
    pub attributes: AttributeSet,
}

/// Face bounding box in pixel coordinates of the submitted image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRectangle {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl FaceRectangle {
    /// Create a new rectangle.
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> u32 {
        self.left.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }

    /// Clamp the rectangle so it lies within an image of the given size.
    ///
    /// Returns `None` when nothing of the rectangle is left inside the image.
    pub fn clamp_to(&self, image_width: u32, image_height: u32) -> Option<Self> {
        if self.left >= image_width || self.top >= image_height {
            return None;
        }
        let width = self.right().min(image_width) - self.left;
        let height = self.bottom().min(image_height) - self.top;
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self::new(self.left, self.top, width, height))
    }
}

/// Analysed attributes for a single face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSet {
    pub age: Valued<u32>,
    pub gender: Valued<String>,
    pub smile: Smile,
    pub emotion: EmotionScores,
    pub headpose: HeadPose,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beauty: Option<Beauty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<Valued<String>>,
}

impl AttributeSet {
    /// Age in years.
    pub fn age(&self) -> u32 {
        self.age.value
    }

    /// Gender as reported by the service.
    pub fn gender(&self) -> &str {
        &self.gender.value
    }

    /// Smile score, 0-100.
    pub fn smile_score(&self) -> f64 {
        self.smile.value
    }

    /// Ethnicity, when the service returned one.
    pub fn ethnicity(&self) -> Option<&str> {
        self.ethnicity.as_ref().map(|e| e.value.as_str())
    }
}

/// The `{ "value": ... }` wrapper the service uses for scalar attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valued<T> {
    pub value: T,
}

impl<T> Valued<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

/// Smile attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Smile {
    /// Smile score, 0-100
    pub value: f64,
    /// Service threshold above which the face is considered smiling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl Smile {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            threshold: None,
        }
    }
}

/// Head orientation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadPose {
    pub pitch_angle: f64,
    pub roll_angle: f64,
    pub yaw_angle: f64,
}

/// Beauty scores as judged by the service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Beauty {
    pub female_score: f64,
    pub male_score: f64,
}

/// Emotion name to percentage score, in the order the service sent them.
///
/// Scores are not normalized and need not sum to 100.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmotionScores(Vec<(String, f64)>);

impl EmotionScores {
    pub fn new(scores: Vec<(String, f64)>) -> Self {
        Self(scores)
    }

    /// Iterate `(name, score)` pairs in response order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, score)| (name.as_str(), *score))
    }

    /// Score of a single emotion.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, score)| *score)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for EmotionScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, score) in &self.0 {
            map.serialize_entry(name, score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EmotionScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EmotionVisitor;

        impl<'de> Visitor<'de> for EmotionVisitor {
            type Value = EmotionScores;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of emotion names to scores")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut scores = Vec::with_capacity(access.size_hint().unwrap_or(7));
                while let Some((name, score)) = access.next_entry::<String, f64>()? {
                    scores.push((name, score));
                }
                Ok(EmotionScores(scores))
            }
        }

        deserializer.deserialize_map(EmotionVisitor)
    }
}
