use uuid::Uuid;

use crate::database::Table;
use crate::models::diagnosis::{DiagnosisBooking, DiagnosisReport, DiagnosticJob};
use crate::utils::errors::{not_found_error, AppResult};

/// Informes de diagnóstico guardados y análisis de síntomas
#[derive(Clone, Default)]
pub struct DiagnosisRepository {
    reports: Table<DiagnosisReport>,
    jobs: Table<DiagnosticJob>,
    bookings: Table<DiagnosisBooking>,
}

impl DiagnosisRepository {
    pub fn new(reports: Vec<DiagnosisReport>) -> Self {
        Self {
            reports: Table::from_rows(reports.into_iter().map(|r| (r.id, r)).collect()),
            jobs: Table::new(),
            bookings: Table::new(),
        }
    }

    /// Informes del propietario, más recientes primero
    pub async fn reports_for(&self, owner_id: Uuid, vehicle_id: Option<Uuid>) -> Vec<DiagnosisReport> {
        let mut reports = self
            .reports
            .filter(|r| r.owner_id == owner_id && vehicle_id.map_or(true, |v| r.vehicle_id == v))
            .await;
        reports.sort_by(|a, b| b.date.cmp(&a.date));
        reports
    }

    pub async fn create_job(&self, job: DiagnosticJob) -> DiagnosticJob {
        self.jobs.insert(job.id, job.clone()).await;
        job
    }

    pub async fn find_job(&self, owner_id: Uuid, id: Uuid) -> AppResult<DiagnosticJob> {
        self.jobs
            .get(id)
            .await
            .filter(|j| j.owner_id == owner_id)
            .ok_or_else(|| not_found_error("Diagnostic job", &id.to_string()))
    }

    pub async fn update_job<R, F>(&self, id: Uuid, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut DiagnosticJob) -> AppResult<R>,
    {
        self.jobs.update(id, "Diagnostic job", f).await
    }

    pub async fn jobs_for(&self, owner_id: Uuid) -> Vec<DiagnosticJob> {
        self.jobs.filter(|j| j.owner_id == owner_id).await
    }

    /// Guarda la cita y su informe pendiente
    pub async fn create_booking(&self, booking: DiagnosisBooking, report: DiagnosisReport) -> DiagnosisBooking {
        self.reports.insert(report.id, report).await;
        self.bookings.insert(booking.id, booking.clone()).await;
        booking
    }

    /// Próximas primero
    pub async fn bookings_for(&self, owner_id: Uuid) -> Vec<DiagnosisBooking> {
        let mut bookings = self.bookings.filter(|b| b.owner_id == owner_id).await;
        bookings.sort_by(|a, b| (a.date, &a.time).cmp(&(b.date, &b.time)));
        bookings
    }
}
