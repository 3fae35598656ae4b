//! Core data model for rule-based patient triage: records, findings, reports.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod store;

pub use store::{InMemoryPatientStore, PatientStore};

/// Tunables for analysis and report composition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TriageConfig {
    /// Keep findings whose status is normal in the report.
    pub report_normal_findings: bool,
    /// Run the symptom correlation pass over inferred conditions.
    pub correlate_symptoms: bool,
    /// Patients older than this get the annual screening advice.
    pub screening_age: u32,
    /// BMI at or above which weight management is advised.
    pub weight_management_bmi: f64,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            report_normal_findings: false,
            correlate_symptoms: true,
            screening_age: 40,
            weight_management_bmi: 25.0,
        }
    }
}

/// Severity ladder shared by findings and the overall report.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Normal,
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Normal => "normal",
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal confidence attached to a condition inference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Confidence {
    Low,
    Moderate,
    High,
}

impl Confidence {
    /// One level up, saturating at `High`.
    pub fn raised(self) -> Self {
        match self {
            Confidence::Low => Confidence::Moderate,
            Confidence::Moderate | Confidence::High => Confidence::High,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// Parse the conventional notation (`"AB+"`, `"O-"`...).
    pub fn parse(value: &str) -> Option<Self> {
        let group = match value.trim().to_uppercase().as_str() {
            "A+" => BloodGroup::APositive,
            "A-" => BloodGroup::ANegative,
            "B+" => BloodGroup::BPositive,
            "B-" => BloodGroup::BNegative,
            "AB+" => BloodGroup::AbPositive,
            "AB-" => BloodGroup::AbNegative,
            "O+" => BloodGroup::OPositive,
            "O-" => BloodGroup::ONegative,
            _ => return None,
        };
        Some(group)
    }
}

/// Clinical grouping used to label findings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Vital Signs")]
    VitalSigns,
    #[serde(rename = "Complete Blood Count")]
    CompleteBloodCount,
    #[serde(rename = "Blood Sugar")]
    BloodSugar,
    #[serde(rename = "Lipid Profile")]
    LipidProfile,
    #[serde(rename = "Kidney Function")]
    KidneyFunction,
    #[serde(rename = "Liver Function")]
    LiverFunction,
    #[serde(rename = "Thyroid Function")]
    ThyroidFunction,
    #[serde(rename = "Electrolytes")]
    Electrolytes,
    #[serde(rename = "Vitamins")]
    Vitamins,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::VitalSigns => "Vital Signs",
            Category::CompleteBloodCount => "Complete Blood Count",
            Category::BloodSugar => "Blood Sugar",
            Category::LipidProfile => "Lipid Profile",
            Category::KidneyFunction => "Kidney Function",
            Category::LiverFunction => "Liver Function",
            Category::ThyroidFunction => "Thyroid Function",
            Category::Electrolytes => "Electrolytes",
            Category::Vitamins => "Vitamins",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Every measured quantity the engine knows a reference range for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Parameter {
    #[serde(rename = "Body Temperature")]
    Temperature,
    #[serde(rename = "Blood Pressure")]
    BloodPressure,
    #[serde(rename = "Heart Rate")]
    HeartRate,
    #[serde(rename = "Respiratory Rate")]
    RespiratoryRate,
    #[serde(rename = "Oxygen Saturation")]
    OxygenSaturation,
    #[serde(rename = "BMI")]
    Bmi,
    #[serde(rename = "Hemoglobin")]
    Hemoglobin,
    #[serde(rename = "WBC Count")]
    WbcCount,
    #[serde(rename = "Platelet Count")]
    PlateletCount,
    #[serde(rename = "RBC Count")]
    RbcCount,
    #[serde(rename = "Fasting Glucose")]
    FastingGlucose,
    #[serde(rename = "Random Glucose")]
    RandomGlucose,
    #[serde(rename = "HbA1c")]
    Hba1c,
    #[serde(rename = "Total Cholesterol")]
    TotalCholesterol,
    #[serde(rename = "LDL Cholesterol")]
    LdlCholesterol,
    #[serde(rename = "HDL Cholesterol")]
    HdlCholesterol,
    #[serde(rename = "Triglycerides")]
    Triglycerides,
    #[serde(rename = "Creatinine")]
    Creatinine,
    #[serde(rename = "BUN")]
    Bun,
    #[serde(rename = "Uric Acid")]
    UricAcid,
    #[serde(rename = "SGOT/AST")]
    SgotAst,
    #[serde(rename = "SGPT/ALT")]
    SgptAlt,
    #[serde(rename = "Total Bilirubin")]
    BilirubinTotal,
    #[serde(rename = "TSH")]
    Tsh,
    #[serde(rename = "T3")]
    T3,
    #[serde(rename = "T4")]
    T4,
    #[serde(rename = "Sodium")]
    Sodium,
    #[serde(rename = "Potassium")]
    Potassium,
    #[serde(rename = "Vitamin D")]
    VitaminD,
    #[serde(rename = "Vitamin B12")]
    VitaminB12,
}

impl Parameter {
    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Temperature => "Body Temperature",
            Parameter::BloodPressure => "Blood Pressure",
            Parameter::HeartRate => "Heart Rate",
            Parameter::RespiratoryRate => "Respiratory Rate",
            Parameter::OxygenSaturation => "Oxygen Saturation",
            Parameter::Bmi => "BMI",
            Parameter::Hemoglobin => "Hemoglobin",
            Parameter::WbcCount => "WBC Count",
            Parameter::PlateletCount => "Platelet Count",
            Parameter::RbcCount => "RBC Count",
            Parameter::FastingGlucose => "Fasting Glucose",
            Parameter::RandomGlucose => "Random Glucose",
            Parameter::Hba1c => "HbA1c",
            Parameter::TotalCholesterol => "Total Cholesterol",
            Parameter::LdlCholesterol => "LDL Cholesterol",
            Parameter::HdlCholesterol => "HDL Cholesterol",
            Parameter::Triglycerides => "Triglycerides",
            Parameter::Creatinine => "Creatinine",
            Parameter::Bun => "BUN",
            Parameter::UricAcid => "Uric Acid",
            Parameter::SgotAst => "SGOT/AST",
            Parameter::SgptAlt => "SGPT/ALT",
            Parameter::BilirubinTotal => "Total Bilirubin",
            Parameter::Tsh => "TSH",
            Parameter::T3 => "T3",
            Parameter::T4 => "T4",
            Parameter::Sodium => "Sodium",
            Parameter::Potassium => "Potassium",
            Parameter::VitaminD => "Vitamin D",
            Parameter::VitaminB12 => "Vitamin B12",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Parameter::Temperature
            | Parameter::BloodPressure
            | Parameter::HeartRate
            | Parameter::RespiratoryRate
            | Parameter::OxygenSaturation
            | Parameter::Bmi => Category::VitalSigns,
            Parameter::Hemoglobin
            | Parameter::WbcCount
            | Parameter::PlateletCount
            | Parameter::RbcCount => Category::CompleteBloodCount,
            Parameter::FastingGlucose | Parameter::RandomGlucose | Parameter::Hba1c => {
                Category::BloodSugar
            }
            Parameter::TotalCholesterol
            | Parameter::LdlCholesterol
            | Parameter::HdlCholesterol
            | Parameter::Triglycerides => Category::LipidProfile,
            Parameter::Creatinine | Parameter::Bun | Parameter::UricAcid => {
                Category::KidneyFunction
            }
            Parameter::SgotAst | Parameter::SgptAlt | Parameter::BilirubinTotal => {
                Category::LiverFunction
            }
            Parameter::Tsh | Parameter::T3 | Parameter::T4 => Category::ThyroidFunction,
            Parameter::Sodium | Parameter::Potassium => Category::Electrolytes,
            Parameter::VitaminD | Parameter::VitaminB12 => Category::Vitamins,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Clinical conditions the composite rules can infer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Condition {
    #[serde(rename = "Diabetes Mellitus")]
    DiabetesMellitus,
    #[serde(rename = "Prediabetes")]
    Prediabetes,
    #[serde(rename = "Hypertensive Crisis")]
    HypertensiveCrisis,
    #[serde(rename = "Hypertension Stage 2")]
    HypertensionStage2,
    #[serde(rename = "Hypertension Stage 1")]
    HypertensionStage1,
    #[serde(rename = "Obesity")]
    Obesity,
    #[serde(rename = "Anemia")]
    Anemia,
    #[serde(rename = "Infection (suspected)")]
    Infection,
    #[serde(rename = "Hyperlipidemia")]
    Hyperlipidemia,
    #[serde(rename = "Chronic Kidney Disease (suspected)")]
    ChronicKidneyDisease,
    #[serde(rename = "Liver Disease (suspected)")]
    LiverDisease,
    #[serde(rename = "Hypothyroidism")]
    Hypothyroidism,
    #[serde(rename = "Hyperthyroidism")]
    Hyperthyroidism,
    #[serde(rename = "Vitamin D Deficiency")]
    VitaminDDeficiency,
    #[serde(rename = "Vitamin B12 Deficiency")]
    VitaminB12Deficiency,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::DiabetesMellitus => "Diabetes Mellitus",
            Condition::Prediabetes => "Prediabetes",
            Condition::HypertensiveCrisis => "Hypertensive Crisis",
            Condition::HypertensionStage2 => "Hypertension Stage 2",
            Condition::HypertensionStage1 => "Hypertension Stage 1",
            Condition::Obesity => "Obesity",
            Condition::Anemia => "Anemia",
            Condition::Infection => "Infection (suspected)",
            Condition::Hyperlipidemia => "Hyperlipidemia",
            Condition::ChronicKidneyDisease => "Chronic Kidney Disease (suspected)",
            Condition::LiverDisease => "Liver Disease (suspected)",
            Condition::Hypothyroidism => "Hypothyroidism",
            Condition::Hyperthyroidism => "Hyperthyroidism",
            Condition::VitaminDDeficiency => "Vitamin D Deficiency",
            Condition::VitaminB12Deficiency => "Vitamin B12 Deficiency",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Vital signs as submitted. Every field is independently optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VitalSigns {
    /// Celsius.
    pub temperature: Option<f64>,
    /// mmHg.
    pub blood_pressure_systolic: Option<f64>,
    /// mmHg.
    pub blood_pressure_diastolic: Option<f64>,
    /// Beats per minute.
    pub heart_rate: Option<f64>,
    /// Breaths per minute.
    pub respiratory_rate: Option<f64>,
    /// Percentage.
    pub oxygen_saturation: Option<f64>,
    /// Kilograms.
    pub weight: Option<f64>,
    /// Centimetres.
    pub height: Option<f64>,
}

impl VitalSigns {
    /// Body mass index rounded to two decimals, when weight and height are known
    /// and the result is finite.
    pub fn bmi(&self) -> Option<f64> {
        let weight = self.weight?;
        let height_m = self.height? / 100.0;
        if height_m <= 0.0 {
            return None;
        }
        let bmi = (weight / (height_m * height_m) * 100.0).round() / 100.0;
        bmi.is_finite().then_some(bmi)
    }
}

/// Laboratory values, grouped by panel. Units follow the usual US conventions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LabResults {
    // Complete blood count
    pub hemoglobin: Option<f64>,
    pub wbc_count: Option<f64>,
    pub platelet_count: Option<f64>,
    pub rbc_count: Option<f64>,

    // Blood sugar
    pub fasting_glucose: Option<f64>,
    pub random_glucose: Option<f64>,
    pub hba1c: Option<f64>,

    // Lipid profile
    pub total_cholesterol: Option<f64>,
    pub ldl_cholesterol: Option<f64>,
    pub hdl_cholesterol: Option<f64>,
    pub triglycerides: Option<f64>,

    // Kidney function
    pub creatinine: Option<f64>,
    pub bun: Option<f64>,
    pub uric_acid: Option<f64>,

    // Liver function
    pub sgot_ast: Option<f64>,
    pub sgpt_alt: Option<f64>,
    pub bilirubin_total: Option<f64>,

    // Thyroid
    pub tsh: Option<f64>,
    pub t3: Option<f64>,
    pub t4: Option<f64>,

    // Electrolytes and vitamins
    pub sodium: Option<f64>,
    pub potassium: Option<f64>,
    pub vitamin_d: Option<f64>,
    pub vitamin_b12: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MedicalHistory {
    pub chronic_conditions: Vec<String>,
    pub allergies: Vec<String>,
    pub current_medications: Vec<String>,
    pub past_surgeries: Vec<String>,
    pub family_history: Vec<String>,
    pub smoking: bool,
    pub alcohol_consumption: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SymptomSeverity {
    Mild,
    #[default]
    Moderate,
    Severe,
}

/// Reported symptoms and the chief complaint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Symptoms {
    pub chief_complaint: String,
    pub symptoms_list: Vec<String>,
    pub duration_days: u32,
    pub severity: SymptomSeverity,
}

/// One submitted patient record. Never mutated once analysis starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientRecord {
    pub patient_id: String,
    pub name: String,
    pub age: u32,
    pub sex: Sex,
    #[serde(default)]
    pub blood_group: Option<BloodGroup>,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub vital_signs: Option<VitalSigns>,
    #[serde(default)]
    pub lab_results: Option<LabResults>,
    #[serde(default)]
    pub medical_history: Option<MedicalHistory>,
    #[serde(default)]
    pub symptoms: Option<Symptoms>,
    /// Metadata only; analysis never reads it.
    pub submitted_at: DateTime<Utc>,
}

impl PatientRecord {
    /// Record with identity only; clinical groups are filled in by the caller.
    pub fn new(patient_id: impl Into<String>, name: impl Into<String>, age: u32, sex: Sex) -> Self {
        Self {
            patient_id: patient_id.into(),
            name: name.into(),
            age,
            sex,
            blood_group: None,
            contact: String::new(),
            vital_signs: None,
            lab_results: None,
            medical_history: None,
            symptoms: None,
            submitted_at: Utc::now(),
        }
    }

    pub fn bmi(&self) -> Option<f64> {
        self.vital_signs.as_ref().and_then(VitalSigns::bmi)
    }

    pub fn summary(&self) -> PatientSummary {
        PatientSummary {
            patient_id: self.patient_id.clone(),
            name: self.name.clone(),
            age: self.age,
            sex: self.sex,
            submitted_at: self.submitted_at,
        }
    }
}

/// Listing entry for stored patients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientSummary {
    pub patient_id: String,
    pub name: String,
    pub age: u32,
    pub sex: Sex,
    pub submitted_at: DateTime<Utc>,
}

/// Result of evaluating one parameter against its reference range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Finding {
    pub category: Category,
    pub parameter: Parameter,
    pub value: f64,
    pub normal_range: String,
    pub status: RiskLevel,
    pub interpretation: String,
    pub recommendations: Vec<String>,
}

impl Finding {
    pub fn is_abnormal(&self) -> bool {
        self.status != RiskLevel::Normal
    }
}

/// A condition inferred from one or more readings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionInference {
    pub condition: Condition,
    pub confidence: Confidence,
    pub risk: RiskLevel,
    pub description: String,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Complete output of one analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticReport {
    pub patient_id: String,
    pub overall_risk: RiskLevel,
    pub summary: String,
    pub findings: Vec<Finding>,
    pub possible_conditions: Vec<ConditionInference>,
    pub immediate_actions: Vec<String>,
    pub follow_up_tests: Vec<String>,
    pub general_recommendations: Vec<String>,
}

impl DiagnosticReport {
    /// Findings carrying exactly the given status, in report order.
    pub fn findings_with_status(&self, status: RiskLevel) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.status == status)
    }

    pub fn condition(&self, condition: Condition) -> Option<&ConditionInference> {
        self.possible_conditions
            .iter()
            .find(|inference| inference.condition == condition)
    }
}

/// Errors surfaced by ingestion, storage and lookup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TriageError {
    #[error("Invalid input for `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },
    #[error("Could not read patient record: {0}")]
    Parse(String),
    #[error("Patient `{0}` is already stored")]
    DuplicatePatient(String),
    #[error("Patient `{0}` not found")]
    UnknownPatient(String),
}

impl TriageError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        TriageError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
