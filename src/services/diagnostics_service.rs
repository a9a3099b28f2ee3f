//! Diagnóstico asistido por síntomas
//!
//! El análisis corre en segundo plano tras una latencia simulada. El cliente
//! consulta el resultado por id y puede cancelarlo; cerrar sesión cancela
//! todos los análisis pendientes del usuario.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::models::diagnosis::{
    CostRange, DiagnosisOption, DiagnosisType, DiagnosticJob, DiagnosticJobStatus, DiagnosticResult,
    Severity, SymptomReport,
};
use crate::repositories::diagnosis_repository::DiagnosisRepository;
use crate::services::task_registry::PendingTasks;
use crate::utils::errors::{validation_error, AppError, AppResult};

/// Motor que convierte síntomas en un diagnóstico
#[async_trait]
pub trait DiagnosticEngine: Send + Sync {
    async fn analyze(&self, report: &SymptomReport) -> AppResult<DiagnosticResult>;
}

/// Reglas por palabras clave sobre los síntomas
pub struct RuleBasedEngine;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn mentions(report: &SymptomReport, keywords: &[&str]) -> bool {
    report.symptoms.iter().any(|symptom| {
        let symptom = symptom.to_lowercase();
        keywords.iter().any(|k| symptom.contains(k))
    })
}

fn cost(min: i64, max: i64) -> CostRange {
    CostRange {
        min: Decimal::new(min, 0),
        max: Decimal::new(max, 0),
    }
}

fn engine_result() -> DiagnosticResult {
    DiagnosticResult {
        confidence: 89,
        primary_issue: "Engine Performance Issue".to_string(),
        severity: Severity::High,
        description: "Based on the selected symptoms and error codes, your vehicle is experiencing engine performance problems that require immediate attention.".to_string(),
        possible_causes: strings(&[
            "Faulty spark plugs or ignition coils",
            "Clogged fuel injectors",
            "Air filter restriction",
            "Fuel pump malfunction",
            "Oxygen sensor failure",
        ]),
        recommendations: strings(&[
            "Perform engine diagnostic scan",
            "Replace spark plugs and ignition coils",
            "Clean or replace fuel injectors",
            "Check and replace air filter",
            "Test fuel pressure system",
        ]),
        parts_required: strings(&["Spark Plugs (Set of 4)", "Air Filter", "Engine Oil (5L)"]),
        estimated_cost: cost(250, 800),
        urgency: "Address within 1-2 days to prevent further damage".to_string(),
        next_steps: strings(&[
            "Book diagnostic appointment immediately",
            "Avoid heavy acceleration until repaired",
            "Monitor engine temperature closely",
            "Keep emergency contact ready",
        ]),
    }
}

fn brake_result() -> DiagnosticResult {
    DiagnosticResult {
        confidence: 94,
        primary_issue: "Brake System Warning".to_string(),
        severity: Severity::High,
        description: "Critical brake system issues detected. Immediate inspection required for safety.".to_string(),
        possible_causes: strings(&[
            "Worn brake pads",
            "Warped brake rotors",
            "Low brake fluid",
            "Brake caliper malfunction",
            "ABS system fault",
        ]),
        recommendations: strings(&[
            "Stop driving immediately if brakes feel unsafe",
            "Inspect brake pads and rotors",
            "Check brake fluid level and quality",
            "Test brake system pressure",
            "Replace worn components",
        ]),
        parts_required: strings(&["Brake Pads (Front Set)", "Brake Rotors (Pair)", "Brake Fluid (1L)"]),
        estimated_cost: cost(300, 1200),
        urgency: "URGENT - Address immediately for safety".to_string(),
        next_steps: strings(&[
            "Schedule emergency brake inspection",
            "Drive carefully to nearest garage",
            "Test brakes in safe area before driving",
            "Have vehicle towed if unsafe",
        ]),
    }
}

fn general_result() -> DiagnosticResult {
    DiagnosticResult {
        confidence: 76,
        primary_issue: "General Maintenance Required".to_string(),
        severity: Severity::Medium,
        description: "Your vehicle shows signs of general wear and maintenance needs. Regular service recommended.".to_string(),
        possible_causes: strings(&[
            "Normal wear and tear",
            "Overdue maintenance",
            "Environmental factors",
            "Driving conditions",
            "Age-related component wear",
        ]),
        recommendations: strings(&[
            "Schedule comprehensive inspection",
            "Perform routine maintenance",
            "Check fluid levels",
            "Inspect belts and hoses",
            "Update service records",
        ]),
        parts_required: strings(&["Engine Oil (5L)", "Oil Filter", "Air Filter"]),
        estimated_cost: cost(150, 400),
        urgency: "Schedule within 1-2 weeks".to_string(),
        next_steps: strings(&[
            "Book routine maintenance appointment",
            "Monitor symptoms for changes",
            "Keep maintenance log updated",
            "Follow manufacturer service schedule",
        ]),
    }
}

#[async_trait]
impl DiagnosticEngine for RuleBasedEngine {
    async fn analyze(&self, report: &SymptomReport) -> AppResult<DiagnosticResult> {
        if report.symptoms.is_empty() {
            return Err(validation_error("symptoms", "Select at least one symptom"));
        }
        // El motor tiene prioridad sobre los frenos
        let result = if mentions(report, &["engine", "power", "fuel"]) {
            engine_result()
        } else if mentions(report, &["brake", "grinding"]) {
            brake_result()
        } else {
            general_result()
        };
        Ok(result)
    }
}

/// Modalidades de diagnóstico reservables
pub fn diagnosis_options() -> Vec<DiagnosisOption> {
    vec![
        DiagnosisOption {
            kind: DiagnosisType::Technician,
            title: "Technician Visit",
            subtitle: "Expert comes to your location",
            price: Decimal::new(150, 0),
        },
        DiagnosisOption {
            kind: DiagnosisType::Video,
            title: "Video Call",
            subtitle: "Remote diagnosis via video",
            price: Decimal::new(50, 0),
        },
        DiagnosisOption {
            kind: DiagnosisType::Location,
            title: "Visit Location",
            subtitle: "Bring your car to our facility",
            price: Decimal::new(100, 0),
        },
    ]
}

#[derive(Clone)]
pub struct DiagnosticsService {
    repository: DiagnosisRepository,
    engine: Arc<dyn DiagnosticEngine>,
    tasks: PendingTasks,
    latency: Duration,
}

impl DiagnosticsService {
    pub fn new(
        repository: DiagnosisRepository,
        engine: Arc<dyn DiagnosticEngine>,
        tasks: PendingTasks,
        latency: Duration,
    ) -> Self {
        Self {
            repository,
            engine,
            tasks,
            latency,
        }
    }

    /// Registra el análisis y lo lanza en segundo plano
    pub async fn start(&self, owner_id: Uuid, report: SymptomReport) -> AppResult<DiagnosticJob> {
        if report.symptoms.iter().all(|s| s.trim().is_empty()) {
            return Err(validation_error("symptoms", "Select at least one symptom"));
        }

        let job = self
            .repository
            .create_job(DiagnosticJob {
                id: Uuid::new_v4(),
                owner_id,
                report: report.clone(),
                status: DiagnosticJobStatus::Analyzing,
                result: None,
                error: None,
                created_at: Utc::now(),
                finished_at: None,
            })
            .await;

        let repository = self.repository.clone();
        let engine = Arc::clone(&self.engine);
        let latency = self.latency;
        let job_id = job.id;

        self.tasks
            .spawn(owner_id, job_id, async move {
                tokio::time::sleep(latency).await;
                let outcome = engine.analyze(&report).await;
                let stored = repository
                    .update_job(job_id, |job| {
                        if job.status != DiagnosticJobStatus::Analyzing {
                            return Ok(());
                        }
                        match outcome {
                            Ok(result) => {
                                job.status = DiagnosticJobStatus::Completed;
                                job.result = Some(result);
                            }
                            Err(e) => {
                                job.status = DiagnosticJobStatus::Failed;
                                job.error = Some(e.to_string());
                            }
                        }
                        job.finished_at = Some(Utc::now());
                        Ok(())
                    })
                    .await;
                if let Err(e) = stored {
                    tracing::error!(%job_id, "❌ Could not store diagnostic result: {}", e);
                } else {
                    tracing::info!(%job_id, "🔍 Diagnostic analysis finished");
                }
            })
            .await;

        tracing::info!(%owner_id, job_id = %job.id, "🔍 Diagnostic analysis started");
        Ok(job)
    }

    pub async fn get(&self, owner_id: Uuid, job_id: Uuid) -> AppResult<DiagnosticJob> {
        self.repository.find_job(owner_id, job_id).await
    }

    /// Cancela un análisis en curso
    pub async fn cancel(&self, owner_id: Uuid, job_id: Uuid) -> AppResult<DiagnosticJob> {
        let job = self.repository.find_job(owner_id, job_id).await?;
        if job.status != DiagnosticJobStatus::Analyzing {
            return Err(AppError::Conflict(format!(
                "Diagnostic job '{}' already finished",
                job_id
            )));
        }

        self.tasks.cancel(owner_id, job_id).await;
        let job = self.mark_cancelled(job_id).await?;
        tracing::info!(%owner_id, %job_id, "🛑 Diagnostic analysis cancelled");
        Ok(job)
    }

    /// Marca como canceladas las tareas ya abortadas que sean análisis
    pub async fn mark_all_cancelled(&self, task_ids: &[Uuid]) -> usize {
        let mut cancelled = 0;
        for id in task_ids {
            if self.mark_cancelled(*id).await.is_ok() {
                cancelled += 1;
            }
        }
        cancelled
    }

    async fn mark_cancelled(&self, job_id: Uuid) -> AppResult<DiagnosticJob> {
        self.repository
            .update_job(job_id, |job| {
                if job.status == DiagnosticJobStatus::Analyzing {
                    job.status = DiagnosticJobStatus::Cancelled;
                    job.finished_at = Some(Utc::now());
                }
                Ok(job.clone())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(symptoms: &[&str]) -> SymptomReport {
        SymptomReport {
            symptoms: strings(symptoms),
            error_codes: None,
            details: None,
        }
    }

    #[tokio::test]
    async fn test_rules_pick_result_by_symptoms() {
        let engine = RuleBasedEngine;
        let engine_issue = engine.analyze(&report(&["Loss of power", "Brake squealing"])).await.unwrap();
        assert_eq!(engine_issue.confidence, 89);

        let brakes = engine.analyze(&report(&["Grinding noise when braking"])).await.unwrap();
        assert_eq!(brakes.primary_issue, "Brake System Warning");

        let general = engine.analyze(&report(&["AC not cooling"])).await.unwrap();
        assert_eq!(general.severity, Severity::Medium);
        assert_eq!(general.estimated_cost, cost(150, 400));
    }

    fn service(latency_ms: u64) -> (DiagnosticsService, PendingTasks) {
        let tasks = PendingTasks::new();
        let service = DiagnosticsService::new(
            DiagnosisRepository::default(),
            Arc::new(RuleBasedEngine),
            tasks.clone(),
            Duration::from_millis(latency_ms),
        );
        (service, tasks)
    }

    #[tokio::test]
    async fn test_analysis_completes_after_latency() {
        let (service, _) = service(20);
        let owner = Uuid::new_v4();
        let job = service.start(owner, report(&["Poor fuel economy"])).await.unwrap();
        assert_eq!(job.status, DiagnosticJobStatus::Analyzing);

        tokio::time::sleep(Duration::from_millis(150)).await;

        let job = service.get(owner, job.id).await.unwrap();
        assert_eq!(job.status, DiagnosticJobStatus::Completed);
        assert_eq!(job.result.unwrap().primary_issue, "Engine Performance Issue");
    }

    #[tokio::test]
    async fn test_cancelled_analysis_never_completes() {
        let (service, tasks) = service(100);
        let owner = Uuid::new_v4();
        let job = service.start(owner, report(&["Rough idle"])).await.unwrap();

        let cancelled = service.cancel(owner, job.id).await.unwrap();
        assert_eq!(cancelled.status, DiagnosticJobStatus::Cancelled);
        assert_eq!(tasks.pending_for(owner).await, 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        let job = service.get(owner, job.id).await.unwrap();
        assert_eq!(job.status, DiagnosticJobStatus::Cancelled);
        assert!(job.result.is_none());

        assert!(matches!(service.cancel(owner, job.id).await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_empty_symptoms_rejected() {
        let (service, _) = service(10);
        let result = service.start(Uuid::new_v4(), report(&[])).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_other_users_job_is_not_found() {
        let (service, _) = service(10);
        let job = service.start(Uuid::new_v4(), report(&["Rough idle"])).await.unwrap();
        assert!(matches!(
            service.get(Uuid::new_v4(), job.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
