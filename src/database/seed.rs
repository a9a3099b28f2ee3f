//! Datos de demostración
//!
//! Ids fijos para que los clientes y los tests de integración puedan
//! referirse a ellos.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::store::Store;
use crate::models::completion::StoredAttachment;
use crate::models::diagnosis::{DiagnosisReport, DiagnosisType, ReportStatus, Severity};
use crate::models::fleet::{Fleet, FleetDriver, FleetVehicle, MaintenanceAlert};
use crate::models::garage::{Garage, GeoPoint, WorkingHours};
use crate::models::inspection::{Finding, InspectionReport, InspectionReportStatus, InspectionType};
use crate::models::job::{CompletedJob, MaintenanceItem, Priority};
use crate::models::loyalty::{LoyaltyAccount, LoyaltyActivity, Reward};
use crate::models::quote::{Quote, QuoteStatus};
use crate::models::review::{GarageReview, ReviewResponse};
use crate::models::service_request::{RequestStatus, ServiceRequest, ServiceRequestKind, Urgency};
use crate::models::user::{AuthUser, UserRole};
use crate::models::vehicle::{Vehicle, VehicleInfo};
use crate::models::warranty::{ClaimStatus, Warranty, WarrantyClaim, WarrantyType};
use crate::repositories::{
    booking_repository::BookingRepository, chat_repository::ChatRepository,
    diagnosis_repository::DiagnosisRepository, fleet_repository::FleetRepository,
    garage_repository::GarageRepository, history_repository::HistoryRepository,
    inspection_repository::InspectionRepository, loyalty_repository::LoyaltyRepository,
    review_repository::ReviewRepository, service_request_repository::ServiceRequestRepository,
    user_repository::UserRepository, vehicle_repository::VehicleRepository,
    warranty_repository::WarrantyRepository,
};

// Usuarios
pub const AHMED_ID: Uuid = Uuid::from_u128(0x0001);
pub const SARA_ID: Uuid = Uuid::from_u128(0x0002);
pub const OMAR_ID: Uuid = Uuid::from_u128(0x0003);
pub const AL_FUTTAIM_OWNER_ID: Uuid = Uuid::from_u128(0x0010);
pub const DUBAI_AUTO_CARE_OWNER_ID: Uuid = Uuid::from_u128(0x0011);
pub const QUICK_FIX_OWNER_ID: Uuid = Uuid::from_u128(0x0012);
pub const EMIRATES_OWNER_ID: Uuid = Uuid::from_u128(0x0013);
pub const ADMIN_ID: Uuid = Uuid::from_u128(0x0020);

pub const AHMED_PHONE: &str = "+971501234567";
pub const AL_FUTTAIM_PHONE: &str = "+97142345678";
pub const QUICK_FIX_PHONE: &str = "+97144567890";
pub const ADMIN_PHONE: &str = "+971500000001";

// Talleres
pub const AL_FUTTAIM_ID: Uuid = Uuid::from_u128(0x0101);
pub const DUBAI_AUTO_CARE_ID: Uuid = Uuid::from_u128(0x0102);
pub const QUICK_FIX_ID: Uuid = Uuid::from_u128(0x0103);
pub const EMIRATES_AUTO_CARE_ID: Uuid = Uuid::from_u128(0x0104);

// Vehículos
pub const CAMRY_ID: Uuid = Uuid::from_u128(0x0201);
pub const BMW_ID: Uuid = Uuid::from_u128(0x0202);

// Solicitudes y cotizaciones
pub const ENGINE_REQUEST_ID: Uuid = Uuid::from_u128(0x0301);
pub const OIL_REQUEST_ID: Uuid = Uuid::from_u128(0x0302);
pub const BRAKE_REQUEST_ID: Uuid = Uuid::from_u128(0x0303);
pub const AC_REQUEST_ID: Uuid = Uuid::from_u128(0x0304);
pub const AL_FUTTAIM_ENGINE_QUOTE_ID: Uuid = Uuid::from_u128(0x0401);
pub const EMIRATES_ENGINE_QUOTE_ID: Uuid = Uuid::from_u128(0x0402);
pub const QUICK_FIX_ENGINE_QUOTE_ID: Uuid = Uuid::from_u128(0x0403);
pub const BRAKE_QUOTE_ID: Uuid = Uuid::from_u128(0x0404);
pub const AC_QUOTE_ID: Uuid = Uuid::from_u128(0x0405);

// Garantías
pub const TOYOTA_WARRANTY_ID: Uuid = Uuid::from_u128(0x0501);
pub const EXTENDED_WARRANTY_ID: Uuid = Uuid::from_u128(0x0502);
pub const SERVICE_WARRANTY_ID: Uuid = Uuid::from_u128(0x0503);

pub const FLEET_ID: Uuid = Uuid::from_u128(0x0601);

// Informes de inspección
pub const AHMED_INSPECTION_REPORT_ID: Uuid = Uuid::from_u128(0x0801);
pub const SARA_INSPECTION_REPORT_ID: Uuid = Uuid::from_u128(0x0802);

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    let naive = date(y, m, d).and_hms_opt(h, 0, 0).unwrap_or_default();
    Utc.from_utc_datetime(&naive)
}

fn aed(amount: i64) -> Decimal {
    Decimal::new(amount, 0)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn user(id: Uuid, name: &str, phone: &str, email: Option<&str>, role: UserRole, garage_id: Option<Uuid>) -> AuthUser {
    AuthUser {
        id,
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.map(str::to_string),
        role,
        garage_id,
        permissions: if role == UserRole::Admin {
            strings(&["manage_users", "manage_garages", "view_reports"])
        } else {
            Vec::new()
        },
        created_at: at(2023, 11, 1, 8) + Duration::hours(id.as_u128() as i64),
    }
}

fn users() -> Vec<AuthUser> {
    vec![
        user(AHMED_ID, "Ahmed Al-Rashid", AHMED_PHONE, Some("ahmed@email.com"), UserRole::Customer, None),
        user(SARA_ID, "Sara Mohammed", "+971559876543", Some("sara@email.com"), UserRole::Customer, None),
        user(OMAR_ID, "Omar Hassan", "+971524567890", None, UserRole::Customer, None),
        user(AL_FUTTAIM_OWNER_ID, "Al Futtaim Motors", AL_FUTTAIM_PHONE, Some("service@alfuttaim.ae"), UserRole::Garage, Some(AL_FUTTAIM_ID)),
        user(DUBAI_AUTO_CARE_OWNER_ID, "Dubai Auto Care", "+97143456789", Some("info@dubaiautocare.ae"), UserRole::Garage, Some(DUBAI_AUTO_CARE_ID)),
        user(QUICK_FIX_OWNER_ID, "Quick Fix Garage", QUICK_FIX_PHONE, None, UserRole::Garage, Some(QUICK_FIX_ID)),
        user(EMIRATES_OWNER_ID, "Emirates Auto Care", "+97145678901", None, UserRole::Garage, Some(EMIRATES_AUTO_CARE_ID)),
        user(ADMIN_ID, "Repyr Admin", ADMIN_PHONE, Some("admin@repyr.ae"), UserRole::Admin, None),
    ]
}

#[allow(clippy::too_many_arguments)]
fn garage(
    id: Uuid,
    owner_id: Uuid,
    name: &str,
    owner_name: &str,
    address: &str,
    phone: &str,
    rating: f64,
    hours: (&str, &str, &[&str]),
    location: GeoPoint,
    verified: bool,
) -> Garage {
    Garage {
        id,
        name: name.to_string(),
        owner_name: owner_name.to_string(),
        address: address.to_string(),
        phone: phone.to_string(),
        email: None,
        rating,
        services: strings(&["Oil Change", "Brake Service", "AC Repair", "Engine Diagnostics"]),
        specializations: strings(&["Japanese Cars", "German Cars"]),
        daily_capacity: 12,
        working_hours: WorkingHours {
            open: hours.0.to_string(),
            close: hours.1.to_string(),
            days: strings(hours.2),
        },
        location: Some(location),
        verified,
        owner_id,
    }
}

const MON_SAT: &[&str] = &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MON_FRI: &[&str] = &["Mon", "Tue", "Wed", "Thu", "Fri"];
const ALL_WEEK: &[&str] = &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

fn garages() -> Vec<Garage> {
    vec![
        garage(AL_FUTTAIM_ID, AL_FUTTAIM_OWNER_ID, "Al Futtaim Motors", "Khalid Al Futtaim", "Sheikh Zayed Road, Dubai", AL_FUTTAIM_PHONE, 4.8, ("08:00", "18:00", MON_SAT), GeoPoint { lat: 25.2048, lng: 55.2708 }, true),
        garage(DUBAI_AUTO_CARE_ID, DUBAI_AUTO_CARE_OWNER_ID, "Dubai Auto Care", "Rashid Ibrahim", "Business Bay, Dubai", "+97143456789", 4.6, ("09:00", "17:00", MON_FRI), GeoPoint { lat: 25.1865, lng: 55.2637 }, false),
        garage(QUICK_FIX_ID, QUICK_FIX_OWNER_ID, "Quick Fix Garage", "Faisal Nasser", "Jumeirah, Dubai", QUICK_FIX_PHONE, 4.4, ("08:30", "19:00", ALL_WEEK), GeoPoint { lat: 25.2285, lng: 55.2593 }, true),
        garage(EMIRATES_AUTO_CARE_ID, EMIRATES_OWNER_ID, "Emirates Auto Care", "Yousef Saeed", "Al Quoz Industrial Area, Dubai", "+97145678901", 4.6, ("08:00", "20:00", MON_SAT), GeoPoint { lat: 25.1412, lng: 55.2310 }, true),
    ]
}

fn vehicles() -> Vec<Vehicle> {
    vec![
        Vehicle {
            id: CAMRY_ID,
            owner_id: AHMED_ID,
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2020,
            plate: "A-12345".to_string(),
            is_primary: true,
            created_at: at(2023, 11, 2, 10),
        },
        Vehicle {
            id: BMW_ID,
            owner_id: AHMED_ID,
            make: "BMW".to_string(),
            model: "X5".to_string(),
            year: 2015,
            plate: "B-67890".to_string(),
            is_primary: false,
            created_at: at(2023, 12, 5, 10),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn quote(
    id: Uuid,
    garage_id: Uuid,
    garage_name: &str,
    rating: f64,
    price: i64,
    estimated_time: &str,
    description: &str,
    distance_km: Option<f64>,
    status: QuoteStatus,
    created_at: DateTime<Utc>,
) -> Quote {
    Quote {
        id,
        garage_id,
        garage_name: garage_name.to_string(),
        rating,
        labor_cost: aed(price),
        parts_cost: Decimal::ZERO,
        urgent: false,
        price: aed(price),
        estimated_time: estimated_time.to_string(),
        description: description.to_string(),
        notes: None,
        distance_km,
        valid_until: match status {
            QuoteStatus::Pending => Utc::now() + Duration::days(3),
            _ => created_at + Duration::days(3),
        },
        status,
        created_at,
    }
}

#[allow(clippy::too_many_arguments)]
fn request(
    id: Uuid,
    customer: (Uuid, &str, &str),
    vehicle: (Option<Uuid>, &str, &str, i32, &str),
    service_type: &str,
    description: &str,
    urgency: Urgency,
    preferred: (NaiveDate, &str),
    status: RequestStatus,
    quotes: Vec<Quote>,
    created_at: DateTime<Utc>,
) -> ServiceRequest {
    ServiceRequest {
        id,
        customer_id: customer.0,
        customer_name: customer.1.to_string(),
        customer_phone: customer.2.to_string(),
        vehicle_id: vehicle.0,
        vehicle_info: VehicleInfo {
            make: vehicle.1.to_string(),
            model: vehicle.2.to_string(),
            year: vehicle.3,
            plate: vehicle.4.to_string(),
        },
        kind: ServiceRequestKind::KnownIssue,
        service_type: service_type.to_string(),
        description: description.to_string(),
        urgency,
        preferred_date: preferred.0,
        preferred_time: preferred.1.to_string(),
        location: Some("Dubai Marina".to_string()),
        status,
        quotes,
        completion: None,
        history: Vec::new(),
        created_at,
        updated_at: created_at,
    }
}

fn service_requests() -> Vec<ServiceRequest> {
    let ahmed = (AHMED_ID, "Ahmed Al-Rashid", AHMED_PHONE);
    let camry = (Some(CAMRY_ID), "Toyota", "Camry", 2020, "A-12345");
    let engine_quoted = at(2024, 2, 10, 9);

    vec![
        request(
            ENGINE_REQUEST_ID,
            ahmed,
            camry,
            "Engine Performance Issue",
            "Car is making strange noises and losing power when accelerating",
            Urgency::High,
            (date(2024, 2, 15), "10:00"),
            RequestStatus::Quoted,
            vec![
                quote(AL_FUTTAIM_ENGINE_QUOTE_ID, AL_FUTTAIM_ID, "Al Futtaim Motors", 4.8, 450, "2-3 hours", "Complete engine diagnostic and repair", Some(2.3), QuoteStatus::Pending, engine_quoted),
                quote(EMIRATES_ENGINE_QUOTE_ID, EMIRATES_AUTO_CARE_ID, "Emirates Auto Care", 4.6, 520, "1.5-2 hours", "Engine inspection with premium parts", Some(3.1), QuoteStatus::Pending, engine_quoted),
                quote(QUICK_FIX_ENGINE_QUOTE_ID, QUICK_FIX_ID, "Quick Fix Garage", 4.4, 380, "2-4 hours", "Basic engine repair service", Some(4.2), QuoteStatus::Pending, engine_quoted),
            ],
            at(2024, 2, 9, 14),
        ),
        request(
            OIL_REQUEST_ID,
            ahmed,
            camry,
            "Oil Change",
            "Regular maintenance oil change needed",
            Urgency::Medium,
            (date(2024, 2, 16), "09:00"),
            RequestStatus::Pending,
            Vec::new(),
            at(2024, 2, 11, 8),
        ),
        request(
            BRAKE_REQUEST_ID,
            (SARA_ID, "Sara Mohammed", "+971559876543"),
            (None, "Honda", "Accord", 2019, "B-67890"),
            "Brake Service",
            "Brakes are squeaking and feel less responsive",
            Urgency::High,
            (date(2024, 2, 14), "11:00"),
            RequestStatus::InProgress,
            vec![quote(BRAKE_QUOTE_ID, AL_FUTTAIM_ID, "Al Futtaim Motors", 4.8, 450, "2-3 hours", "Brake pad and disc replacement", None, QuoteStatus::Accepted, at(2024, 2, 8, 12))],
            at(2024, 2, 8, 9),
        ),
        request(
            AC_REQUEST_ID,
            (OMAR_ID, "Omar Hassan", "+971524567890"),
            (None, "Nissan", "Altima", 2021, "C-11111"),
            "AC Repair",
            "Air conditioning not cooling properly",
            Urgency::Low,
            (date(2024, 2, 18), "14:00"),
            RequestStatus::Quoted,
            vec![quote(AC_QUOTE_ID, AL_FUTTAIM_ID, "Al Futtaim Motors", 4.8, 320, "1-2 hours", "AC system diagnosis and refrigerant refill", None, QuoteStatus::Pending, at(2024, 2, 12, 10))],
            at(2024, 2, 12, 7),
        ),
    ]
}

fn warranties() -> Vec<Warranty> {
    vec![
        Warranty {
            id: TOYOTA_WARRANTY_ID,
            customer_id: AHMED_ID,
            vehicle_id: Some(CAMRY_ID),
            service_request_id: None,
            warranty_type: WarrantyType::Manufacturer,
            coverage: None,
            provider: "Toyota UAE".to_string(),
            start_date: date(2020, 1, 15),
            end_date: date(2025, 1, 15),
            coverage_details: "Engine, transmission, and electrical components".to_string(),
            document: None,
            claim_history: vec![WarrantyClaim {
                id: Uuid::from_u128(0x0511),
                date: date(2023, 6, 15),
                description: "AC Compressor Replacement".to_string(),
                status: ClaimStatus::Approved,
                amount: aed(1200),
            }],
        },
        Warranty {
            id: EXTENDED_WARRANTY_ID,
            customer_id: AHMED_ID,
            vehicle_id: Some(CAMRY_ID),
            service_request_id: None,
            warranty_type: WarrantyType::Extended,
            coverage: None,
            provider: "Al Futtaim Extended".to_string(),
            start_date: date(2023, 1, 15),
            end_date: date(2026, 1, 15),
            coverage_details: "Comprehensive coverage including AC and suspension".to_string(),
            document: None,
            claim_history: Vec::new(),
        },
        Warranty {
            id: SERVICE_WARRANTY_ID,
            customer_id: AHMED_ID,
            vehicle_id: Some(CAMRY_ID),
            service_request_id: None,
            warranty_type: WarrantyType::Service,
            coverage: None,
            provider: "Premium Auto Care".to_string(),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            coverage_details: "Regular maintenance and oil changes".to_string(),
            document: None,
            claim_history: vec![WarrantyClaim {
                id: Uuid::from_u128(0x0512),
                date: date(2024, 1, 20),
                description: "Oil Change Service".to_string(),
                status: ClaimStatus::Approved,
                amount: aed(180),
            }],
        },
    ]
}

fn completed_jobs() -> Vec<CompletedJob> {
    let job = |n: u128, service: &str, garage: &str, day: NaiveDate, cost: i64, rating: u8, description: &str, warranty: &str| {
        CompletedJob {
            id: Uuid::from_u128(0x0700 + n),
            service_request_id: None,
            customer_id: AHMED_ID,
            service_name: service.to_string(),
            garage_name: garage.to_string(),
            completed_date: day,
            cost: aed(cost),
            rating: Some(rating),
            description: description.to_string(),
            warranty_period: Some(warranty.to_string()),
        }
    };

    vec![
        job(1, "Complete Brake Service", "Al Futtaim Motors", date(2024, 1, 20), 850, 5, "Front and rear brake pads replacement, brake fluid change", "6 months / 10,000 km"),
        job(2, "Engine Oil Change", "Quick Lube Center", date(2024, 1, 15), 180, 4, "Synthetic oil change with filter replacement", "3 months / 5,000 km"),
        job(3, "AC System Repair", "Cool Air Services", date(2024, 1, 10), 650, 5, "AC compressor repair and refrigerant refill", "12 months / 15,000 km"),
        job(4, "Tire Replacement", "Tire Pro Center", date(2024, 1, 5), 1200, 4, "Four new tires with alignment and balancing", "24 months / 40,000 km"),
        job(5, "Battery Replacement", "Auto Electric Pro", date(2023, 12, 28), 320, 5, "New battery installation with electrical system check", "18 months"),
    ]
}

fn maintenance_items() -> Vec<MaintenanceItem> {
    let item = |n: u128, kind: &str, description: &str, due: NaiveDate, mileage: u32, priority: Priority, cost: i64, confidence: u8| {
        MaintenanceItem {
            id: Uuid::from_u128(0x0800 + n),
            owner_id: AHMED_ID,
            vehicle_id: CAMRY_ID,
            kind: kind.to_string(),
            description: description.to_string(),
            due_date: due,
            due_mileage: mileage,
            priority,
            estimated_cost: aed(cost),
            ai_confidence: confidence,
        }
    };

    vec![
        item(1, "Oil Change", "Engine oil and filter replacement based on driving patterns", date(2024, 2, 15), 85000, Priority::High, 180, 95),
        item(2, "Brake Pads", "Front brake pads showing wear based on braking data", date(2024, 3, 1), 87000, Priority::Medium, 450, 88),
        item(3, "Air Filter", "Air filter replacement recommended for dusty conditions", date(2024, 2, 20), 86000, Priority::Low, 80, 92),
        item(4, "Battery Check", "Battery performance declining in high temperatures", date(2024, 2, 10), 84500, Priority::Medium, 120, 85),
    ]
}

fn diagnosis_reports() -> Vec<DiagnosisReport> {
    let report = |n: u128, day: NaiveDate, kind: DiagnosisType, summary: &str, details: &str| DiagnosisReport {
        id: Uuid::from_u128(0x0900 + n),
        owner_id: AHMED_ID,
        vehicle_id: CAMRY_ID,
        date: day,
        kind,
        status: ReportStatus::Completed,
        summary: summary.to_string(),
        details: details.to_string(),
    };

    vec![
        report(1, date(2024, 1, 15), DiagnosisType::Technician, "Engine Performance Issue", "Spark plugs worn, air filter clogged. Recommended replacement of both components."),
        report(2, date(2024, 1, 10), DiagnosisType::Video, "AC System Check", "Refrigerant level low, compressor working normally. Recharge recommended."),
        report(3, date(2024, 1, 5), DiagnosisType::Location, "Brake System Inspection", "Front brake pads at 30% life. Rear brakes in good condition."),
    ]
}

fn rewards() -> Vec<Reward> {
    let reward = |id: &str, title: &str, points: u32, description: &str, available: bool| Reward {
        id: id.to_string(),
        title: title.to_string(),
        points,
        description: description.to_string(),
        available,
    };

    vec![
        reward("1", "10% Off Next Service", 500, "Get 10% discount on your next service booking", true),
        reward("2", "Free Oil Change", 800, "Complimentary oil change service", true),
        reward("3", "Priority Booking", 300, "Skip the queue with priority booking", true),
        reward("4", "Free Diagnostic", 1000, "Complimentary vehicle diagnostic", false),
        reward("5", "VIP Service Package", 2000, "Premium service with pickup and delivery", true),
    ]
}

fn loyalty_accounts() -> Vec<LoyaltyAccount> {
    let activity = |day: NaiveDate, action: &str, points: i64, description: &str| LoyaltyActivity {
        date: day,
        action: action.to_string(),
        points,
        description: description.to_string(),
    };

    vec![LoyaltyAccount {
        user_id: AHMED_ID,
        points: 2450,
        total_spent: aed(8500),
        services_completed: 12,
        activity: vec![
            activity(date(2024, 1, 20), "Service Completed", 150, "Brake service at Al Futtaim Motors"),
            activity(date(2024, 1, 15), "Referral Bonus", 200, "Friend joined using your code"),
            activity(date(2024, 1, 10), "Review Posted", 50, "Reviewed Quick Lube Center"),
            activity(date(2024, 1, 5), "Service Completed", 100, "Oil change service"),
        ],
    }]
}

fn fleets() -> Vec<Fleet> {
    let sprinter = Uuid::from_u128(0x0611);
    let hiace = Uuid::from_u128(0x0612);
    let isuzu = Uuid::from_u128(0x0613);
    let fleet_vehicle = |id: Uuid, make: &str, model: &str, year: i32, plate: &str| FleetVehicle {
        id,
        info: VehicleInfo {
            make: make.to_string(),
            model: model.to_string(),
            year,
            plate: plate.to_string(),
        },
    };

    vec![Fleet {
        id: FLEET_ID,
        company_name: "Dubai Logistics Co.".to_string(),
        admin_id: AHMED_ID,
        vehicles: vec![
            fleet_vehicle(sprinter, "Mercedes", "Sprinter", 2022, "D-12345"),
            fleet_vehicle(hiace, "Toyota", "Hiace", 2021, "D-67890"),
            fleet_vehicle(isuzu, "Isuzu", "NPR", 2020, "D-11111"),
        ],
        drivers: vec![
            FleetDriver {
                id: Uuid::from_u128(0x0621),
                name: "Ahmed Hassan".to_string(),
                phone: "+971501234567".to_string(),
                assigned_vehicles: vec![sprinter, hiace],
            },
            FleetDriver {
                id: Uuid::from_u128(0x0622),
                name: "Mohammed Ali".to_string(),
                phone: "+971559876543".to_string(),
                assigned_vehicles: vec![isuzu],
            },
        ],
        alerts: vec![
            MaintenanceAlert { vehicle_id: sprinter, kind: "Oil Change Due".to_string(), priority: Priority::High, due_date: date(2024, 2, 15) },
            MaintenanceAlert { vehicle_id: hiace, kind: "Tire Inspection".to_string(), priority: Priority::Medium, due_date: date(2024, 2, 20) },
            MaintenanceAlert { vehicle_id: isuzu, kind: "Brake Service".to_string(), priority: Priority::High, due_date: date(2024, 2, 10) },
        ],
    }]
}

/// Store sembrado con todos los datos de demostración
fn review(
    n: u128,
    (customer_name, rating): (&str, u8),
    day: NaiveDate,
    service: &str,
    comment: &str,
    helpful: u32,
    response: Option<(&str, NaiveDate)>,
) -> GarageReview {
    GarageReview {
        id: Uuid::from_u128(0x0900 + n),
        garage_id: AL_FUTTAIM_ID,
        customer_name: customer_name.to_string(),
        rating,
        date: day,
        service: service.to_string(),
        comment: comment.to_string(),
        helpful,
        response: response.map(|(text, date)| ReviewResponse {
            text: text.to_string(),
            date,
        }),
    }
}

fn reviews() -> Vec<GarageReview> {
    vec![
        review(1, ("Ahmed K.", 5), date(2024, 1, 20), "Oil Change",
            "Excellent service! Very professional team and quick turnaround. The facility is clean and modern. Highly recommend for regular maintenance.", 12,
            Some(("Thank you Ahmed for your kind words! We appreciate your business and look forward to serving you again.", date(2024, 1, 21)))),
        review(2, ("Sara M.", 5), date(2024, 1, 18), "Brake Service",
            "Had my brakes serviced here and the experience was fantastic. They explained everything clearly and the pricing was transparent. No hidden charges!", 8,
            Some(("We're glad you had a great experience Sara! Transparency is very important to us.", date(2024, 1, 19)))),
        review(3, ("Omar H.", 4), date(2024, 1, 15), "AC Repair",
            "Good service overall. Fixed my AC issue quickly. Only minor complaint is the waiting area could be more comfortable.", 5,
            Some(("Thank you for the feedback Omar. We're working on improving our waiting area facilities.", date(2024, 1, 16)))),
        review(4, ("Fatima A.", 5), date(2024, 1, 12), "Engine Diagnostics",
            "Impressed with their diagnostic equipment and expertise. They found the issue quickly and provided a detailed explanation.", 15, None),
        review(5, ("Mohammed R.", 4), date(2024, 1, 10), "Tire Service",
            "Professional service and good quality tires. Pricing is competitive. Will definitely come back.", 7, None),
    ]
}

/// Solo metadatos; el checksum se toma del nombre al no haber bytes
fn photo(n: u128, file_name: &str) -> StoredAttachment {
    StoredAttachment {
        id: Uuid::from_u128(0x0810 + n),
        file_name: file_name.to_string(),
        content_type: "image/jpeg".to_string(),
        size_bytes: 0,
        checksum: format!("{:x}", md5::compute(file_name)),
    }
}

fn finding(category: &str, issue: &str, severity: Severity, recommendation: &str) -> Finding {
    Finding {
        category: category.to_string(),
        issue: issue.to_string(),
        severity,
        recommendation: recommendation.to_string(),
    }
}

fn inspection_reports() -> Vec<InspectionReport> {
    vec![
        InspectionReport {
            id: AHMED_INSPECTION_REPORT_ID,
            customer_id: Some(AHMED_ID),
            customer_name: "Ahmed Al-Rashid".to_string(),
            customer_phone: AHMED_PHONE.to_string(),
            vehicle: VehicleInfo {
                make: "Toyota".to_string(),
                model: "Camry".to_string(),
                year: 2020,
                plate: "A-12345".to_string(),
            },
            technician_name: "Mohammed Hassan".to_string(),
            report_date: date(2024, 1, 20),
            report_type: InspectionType::Comprehensive,
            status: InspectionReportStatus::Completed,
            findings: vec![
                finding("Engine", "Spark plug wear detected", Severity::Medium, "Replace spark plugs within 1000km"),
                finding("Brakes", "Front brake pads at 30%", Severity::Low, "Monitor and replace within 5000km"),
            ],
            photos: vec![photo(1, "engine1.jpg"), photo(2, "brakes1.jpg")],
            estimated_cost: Some(aed(450)),
            report_file: None,
            created_at: at(2024, 1, 20, 16),
        },
        InspectionReport {
            id: SARA_INSPECTION_REPORT_ID,
            customer_id: Some(SARA_ID),
            customer_name: "Sara Mohammed".to_string(),
            customer_phone: "+971559876543".to_string(),
            vehicle: VehicleInfo {
                make: "BMW".to_string(),
                model: "X5".to_string(),
                year: 2018,
                plate: "B-67890".to_string(),
            },
            technician_name: "Ali Ahmed".to_string(),
            report_date: date(2024, 1, 19),
            report_type: InspectionType::PrePurchase,
            status: InspectionReportStatus::Sent,
            findings: vec![finding(
                "Transmission",
                "Minor fluid leak detected",
                Severity::High,
                "Immediate repair required",
            )],
            photos: vec![photo(3, "transmission1.jpg")],
            estimated_cost: Some(aed(1200)),
            report_file: None,
            created_at: at(2024, 1, 19, 15),
        },
    ]
}

pub fn fixtures() -> Store {
    Store {
        users: UserRepository::new(users()),
        garages: GarageRepository::new(garages()),
        vehicles: VehicleRepository::new(vehicles()),
        requests: ServiceRequestRepository::new(service_requests()),
        warranties: WarrantyRepository::new(warranties()),
        bookings: BookingRepository::default(),
        loyalty: LoyaltyRepository::new(loyalty_accounts(), rewards()),
        diagnosis: DiagnosisRepository::new(diagnosis_reports()),
        history: HistoryRepository::new(completed_jobs(), maintenance_items()),
        fleets: FleetRepository::new(fleets()),
        inspections: InspectionRepository::new(inspection_reports()),
        chat: ChatRepository::default(),
        reviews: ReviewRepository::new(reviews()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixtures_are_consistent() {
        let store = fixtures();

        let ahmed = store.users.find_by_phone(AHMED_PHONE).await.unwrap();
        assert_eq!(ahmed.id, AHMED_ID);

        let vehicles = store.vehicles.find_by_owner(AHMED_ID).await;
        assert_eq!(vehicles.iter().filter(|v| v.is_primary).count(), 1);

        let engine = store.requests.find_by_id(ENGINE_REQUEST_ID).await.unwrap();
        assert_eq!(engine.quotes.len(), 3);
        assert_eq!(engine.status, RequestStatus::Quoted);

        let brake = store.requests.find_by_id(BRAKE_REQUEST_ID).await.unwrap();
        assert_eq!(brake.accepted_quote().map(|q| q.garage_id), Some(AL_FUTTAIM_ID));

        for garage_user in store.users.search(None, Some(UserRole::Garage)).await {
            let garage_id = garage_user.garage_id.unwrap();
            assert!(store.garages.find_by_id(garage_id).await.is_some());
        }

        assert_eq!(store.reviews.for_garage(AL_FUTTAIM_ID).await.len(), 5);
        assert_eq!(store.inspections.count_reports().await, 2);
    }
}
