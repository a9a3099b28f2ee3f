use uuid::Uuid;

use crate::database::Table;
use crate::models::inspection::{
    InspectionBooking, InspectionReport, InspectionReportStatus, ReportStatusFilter,
};
use crate::utils::errors::{AppError, AppResult};

/// Reservas de inspección e informes redactados por el equipo
#[derive(Clone, Default)]
pub struct InspectionRepository {
    bookings: Table<InspectionBooking>,
    reports: Table<InspectionReport>,
}

impl InspectionRepository {
    pub fn new(reports: Vec<InspectionReport>) -> Self {
        Self {
            bookings: Table::new(),
            reports: Table::from_rows(reports.into_iter().map(|r| (r.id, r)).collect()),
        }
    }

    pub async fn create_booking(&self, booking: InspectionBooking) -> InspectionBooking {
        self.bookings.insert(booking.id, booking.clone()).await;
        booking
    }

    /// Próximas primero
    pub async fn bookings_for(&self, customer_id: Uuid) -> Vec<InspectionBooking> {
        let mut bookings = self.bookings.filter(|b| b.customer_id == customer_id).await;
        bookings.sort_by(|a, b| (a.date, &a.time).cmp(&(b.date, &b.time)));
        bookings
    }

    pub async fn create_report(&self, report: InspectionReport) -> InspectionReport {
        self.reports.insert(report.id, report.clone()).await;
        report
    }

    /// Informes más recientes primero, filtrados por estado y texto
    pub async fn search_reports(
        &self,
        query: Option<&str>,
        status: ReportStatusFilter,
    ) -> Vec<InspectionReport> {
        let needle = query.map(|q| q.trim().to_lowercase()).filter(|q| !q.is_empty());
        let mut reports = self
            .reports
            .filter(|r| status.matches(r.status) && needle.as_deref().map_or(true, |q| r.matches(q)))
            .await;
        reports.sort_by(|a, b| b.report_date.cmp(&a.report_date));
        reports
    }

    pub async fn set_report_status(
        &self,
        id: Uuid,
        status: InspectionReportStatus,
    ) -> AppResult<InspectionReport> {
        self.reports
            .update(id, "Inspection report", |report| {
                if !report.status.can_transition_to(status) {
                    return Err(AppError::Conflict(format!(
                        "Inspection report cannot move from {:?} to {:?}",
                        report.status, status
                    )));
                }
                report.status = status;
                Ok(report.clone())
            })
            .await
    }

    /// Informes ya enviados a un cliente
    pub async fn sent_to(&self, customer_id: Uuid) -> Vec<InspectionReport> {
        let mut reports = self
            .reports
            .filter(|r| {
                r.customer_id == Some(customer_id) && r.status == InspectionReportStatus::Sent
            })
            .await;
        reports.sort_by(|a, b| b.report_date.cmp(&a.report_date));
        reports
    }

    pub async fn count_reports(&self) -> usize {
        self.reports.len().await
    }
}
