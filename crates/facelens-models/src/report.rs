//! Localized per-face attribute reports.

use serde::Serialize;

use crate::detection::{AttributeSet, DetectionResponse, FaceRecord};
use crate::labels::{LabelKey, LabelSet};

/// A single `label: value` line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

impl LabeledValue {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }

    fn line(&self, indent: &str) -> String {
        format!("{}- {}: {}", indent, self.label, self.value)
    }
}

/// A heading followed by nested lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledGroup {
    pub label: String,
    pub items: Vec<LabeledValue>,
}

/// Beauty scores, present only when the service returned them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeautyReport {
    pub female: LabeledValue,
    pub male: LabeledValue,
}

/// Human-readable report for one face.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceReport {
    /// 1-based display index
    pub index: usize,
    pub heading: String,
    pub age: LabeledValue,
    pub gender: LabeledValue,
    pub smile: LabeledValue,
    pub emotions: LabeledGroup,
    pub head_pose: LabeledGroup,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beauty: Option<BeautyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<LabeledValue>,
}

impl FaceReport {
    /// Build the report for one face; `index` is 1-based.
    pub fn build(index: usize, face: &FaceRecord, labels: &LabelSet) -> Self {
        let attrs: &AttributeSet = &face.attributes;
        let confidence = labels.get(LabelKey::Confidence);

        let emotions = LabeledGroup {
            label: labels.get(LabelKey::Emotions).to_string(),
            items: attrs
                .emotion
                .iter()
                .map(|(name, score)| {
                    LabeledValue::new(&capitalize(name), format!("{:.2}% {}", score, confidence))
                })
                .collect(),
        };

        let pose = &attrs.headpose;
        let head_pose = LabeledGroup {
            label: labels.get(LabelKey::HeadPose).to_string(),
            items: vec![
                LabeledValue::new(labels.get(LabelKey::Pitch), degrees(pose.pitch_angle)),
                LabeledValue::new(labels.get(LabelKey::Roll), degrees(pose.roll_angle)),
                LabeledValue::new(labels.get(LabelKey::Yaw), degrees(pose.yaw_angle)),
            ],
        };

        let beauty = attrs.beauty.map(|b| BeautyReport {
            female: LabeledValue::new(
                labels.get(LabelKey::BeautyFemale),
                format!("{:.2}", b.female_score),
            ),
            male: LabeledValue::new(
                labels.get(LabelKey::BeautyMale),
                format!("{:.2}", b.male_score),
            ),
        });

        Self {
            index,
            heading: format!("{} {}:", labels.get(LabelKey::Face), index),
            age: LabeledValue::new(labels.get(LabelKey::Age), attrs.age().to_string()),
            gender: LabeledValue::new(labels.get(LabelKey::Gender), attrs.gender()),
            smile: LabeledValue::new(
                labels.get(LabelKey::Smile),
                format!("{:.2}% {}", attrs.smile_score(), confidence),
            ),
            emotions,
            head_pose,
            beauty,
            ethnicity: attrs
                .ethnicity()
                .map(|e| LabeledValue::new(labels.get(LabelKey::Ethnicity), e)),
        }
    }

    /// Render the report as display lines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.heading.clone(),
            self.age.line(" "),
            self.gender.line(" "),
            self.smile.line(" "),
            format!(" - {}:", self.emotions.label),
        ];
        lines.extend(self.emotions.items.iter().map(|item| item.line("   ")));
        lines.push(format!(" - {}:", self.head_pose.label));
        lines.extend(self.head_pose.items.iter().map(|item| item.line("   ")));
        if let Some(beauty) = &self.beauty {
            lines.push(beauty.female.line(" "));
            lines.push(beauty.male.line(" "));
        }
        if let Some(ethnicity) = &self.ethnicity {
            lines.push(ethnicity.line(" "));
        }
        lines
    }
}

/// Build reports for every face, in response order.
pub fn report(response: &DetectionResponse, labels: &LabelSet) -> Vec<FaceReport> {
    response
        .faces
        .iter()
        .enumerate()
        .map(|(i, face)| FaceReport::build(i + 1, face, labels))
        .collect()
}

/// Render a full report as newline-separated text.
pub fn report_text(reports: &[FaceReport]) -> String {
    reports
        .iter()
        .flat_map(FaceReport::lines)
        .collect::<Vec<_>>()
        .join("\n")
}

fn degrees(value: f64) -> String {
    format!("{:.2}°", value)
}

/// Upper-case the first character, lower-case the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{Beauty, EmotionScores, FaceRectangle, HeadPose, Smile, Valued};
    use crate::labels::{labels, Language};

    fn sample_face() -> FaceRecord {
        FaceRecord {
            face_token: None,
            face_rectangle: FaceRectangle::new(10, 10, 50, 50),
            attributes: AttributeSet {
                age: Valued::new(30),
                gender: Valued::new("Male".to_string()),
                smile: Smile::new(12.3),
                emotion: EmotionScores::new(vec![
                    ("happiness".to_string(), 88.0),
                    ("sadness".to_string(), 2.0),
                ]),
                headpose: HeadPose {
                    pitch_angle: 1.111,
                    roll_angle: -2.222,
                    yaw_angle: 3.333,
                },
                beauty: None,
                ethnicity: None,
            },
        }
    }

    #[test]
    fn test_report_without_optional_attributes() {
        let report = FaceReport::build(1, &sample_face(), labels(Language::English));
        assert_eq!(
            report.lines(),
            vec![
                "Face 1:",
                " - Age: 30",
                " - Gender: Male",
                " - Smile: 12.30% confidence",
                " - Emotions:",
                "   - Happiness: 88.00% confidence",
                "   - Sadness: 2.00% confidence",
                " - Head Pose:",
                "   - Pitch: 1.11°",
                "   - Roll: -2.22°",
                "   - Yaw: 3.33°",
            ]
        );
        assert!(report.beauty.is_none());
        assert!(report.ethnicity.is_none());
    }

    #[test]
    fn test_report_with_optional_attributes() {
        let mut face = sample_face();
        face.attributes.beauty = Some(Beauty {
            female_score: 70.123,
            male_score: 68.0,
        });
        face.attributes.ethnicity = Some(Valued::new("ASIAN".to_string()));

        let lines = FaceReport::build(2, &face, labels(Language::English)).lines();
        assert_eq!(lines[0], "Face 2:");
        assert!(lines.contains(&" - Beauty Score (Female): 70.12".to_string()));
        assert!(lines.contains(&" - Beauty Score (Male): 68.00".to_string()));
        assert_eq!(lines.last().unwrap(), " - Ethnicity: ASIAN");
    }

    #[test]
    fn test_blank_ethnicity_still_reported() {
        let body = r#"{"faces": [{
            "face_rectangle": {"left": 0, "top": 0, "width": 5, "height": 5},
            "attributes": {
                "age": {"value": 30},
                "gender": {"value": "Male"},
                "smile": {"value": 1.0},
                "emotion": {},
                "headpose": {"pitch_angle": 0.0, "roll_angle": 0.0, "yaw_angle": 0.0},
                "ethnicity": {"value": ""}
            }
        }]}"#;
        let response = DetectionResponse::from_json(body).unwrap();

        let lines = report(&response, labels(Language::English))[0].lines();
        assert_eq!(lines.last().unwrap(), " - Ethnicity: ");
    }

    #[test]
    fn test_report_in_french() {
        let lines = FaceReport::build(1, &sample_face(), labels(Language::French)).lines();
        assert_eq!(lines[0], "Visage 1:");
        assert_eq!(lines[1], " - Âge: 30");
        assert_eq!(lines[3], " - Sourire: 12.30% confiance");
        assert_eq!(lines[7], " - Orientation de la tête:");
    }

    #[test]
    fn test_report_indexes_in_order() {
        let mut second = sample_face();
        second.attributes.age = Valued::new(41);
        let response = DetectionResponse::from_faces(vec![sample_face(), second]);

        let reports = report(&response, labels(Language::English));
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].index, 1);
        assert_eq!(reports[1].index, 2);
        assert_eq!(reports[1].age.value, "41");

        let text = report_text(&reports);
        assert!(text.starts_with("Face 1:\n"));
        assert!(text.contains("\nFace 2:\n"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("happiness"), "Happiness");
        assert_eq!(capitalize("SURPRISE"), "Surprise");
        assert_eq!(capitalize(""), "");
    }
}
