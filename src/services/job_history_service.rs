//! Historial de trabajos y mantenimiento predictivo

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::job::{CompletedJob, JobPeriod, JobSort, MaintenanceItem, Priority};
use crate::models::service_request::{RequestStatus, ServiceRequest};
use crate::services::pricing_service::{average_rating, total};

pub fn in_period(date: NaiveDate, period: JobPeriod, today: NaiveDate) -> bool {
    match period {
        JobPeriod::All => true,
        JobPeriod::ThisMonth => date.year() == today.year() && date.month() == today.month(),
        JobPeriod::Last3Months => today
            .checked_sub_months(Months::new(3))
            .map_or(true, |start| date >= start),
        JobPeriod::ThisYear => date.year() == today.year(),
    }
}

/// Orden descendente por el criterio elegido; la fecha desempata
pub fn sort_jobs(jobs: &mut [CompletedJob], sort: JobSort) {
    jobs.sort_by(|a, b| {
        let primary = match sort {
            JobSort::Date => b.completed_date.cmp(&a.completed_date),
            JobSort::Cost => b.cost.cmp(&a.cost),
            JobSort::Rating => b.rating.cmp(&a.rating),
        };
        primary.then_with(|| b.completed_date.cmp(&a.completed_date))
    });
}

/// Trabajo cerrado en la plataforma visto como entrada del historial
pub fn job_from_request(request: &ServiceRequest) -> Option<CompletedJob> {
    if request.status != RequestStatus::Completed {
        return None;
    }
    let completion = request.completion.as_ref()?;
    Some(CompletedJob {
        id: completion.id,
        service_request_id: Some(request.id),
        customer_id: request.customer_id,
        service_name: request.service_type.clone(),
        garage_name: request
            .accepted_quote()
            .map(|q| q.garage_name.clone())
            .unwrap_or_default(),
        completed_date: completion.completed_at.date_naive(),
        cost: completion.total_cost,
        rating: None,
        description: completion.work_performed.clone(),
        warranty_period: None,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct JobHistory {
    pub jobs: Vec<CompletedJob>,
    pub count: usize,
    pub total_spent: Decimal,
    pub average_rating: Option<f64>,
}

pub fn job_history(
    mut jobs: Vec<CompletedJob>,
    period: JobPeriod,
    sort: JobSort,
    today: NaiveDate,
) -> JobHistory {
    jobs.retain(|job| in_period(job.completed_date, period, today));
    sort_jobs(&mut jobs, sort);

    JobHistory {
        count: jobs.len(),
        total_spent: total(jobs.iter().map(|j| j.cost)),
        average_rating: average_rating(jobs.iter().filter_map(|j| j.rating)),
        jobs,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MaintenancePlan {
    pub items: Vec<MaintenanceItem>,
    pub total_estimated_cost: Decimal,
    pub high_priority: usize,
}

pub fn maintenance_plan(items: Vec<MaintenanceItem>) -> MaintenancePlan {
    MaintenancePlan {
        total_estimated_cost: total(items.iter().map(|i| i.estimated_cost)),
        high_priority: items.iter().filter(|i| i.priority == Priority::High).count(),
        items,
    }
}

/// Historial completo de un cliente: importado + cerrado en la plataforma
pub fn merge_history(imported: Vec<CompletedJob>, requests: &[ServiceRequest], customer_id: Uuid) -> Vec<CompletedJob> {
    let mut jobs = imported;
    jobs.extend(
        requests
            .iter()
            .filter(|r| r.customer_id == customer_id)
            .filter_map(job_from_request),
    );
    jobs
}
