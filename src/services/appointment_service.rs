//! Appointment service: owner-scoped listings and booking rules.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::{
    CODE_APPOINTMENT_LIMIT, CODE_NOT_FOUND, CODE_UNAUTHORIZED_ACCESS, ERR_APPOINTMENT_NOT_FOUND,
    ERR_FAILED_FETCH_UPDATED, ERR_HOSPITAL_NOT_FOUND, ERR_NO_PERMISSION_APPOINTMENT,
};
use crate::errors::ApiError;
use crate::models::{
    Appointment, AppointmentRequest, AppointmentResponse, Claims, HospitalSummary,
};
use crate::query::{ListQuery, Pagination, QueryParams};
use crate::repositories::{AppointmentRepository, HospitalRepository};
use crate::validators::{parse_object_id, MAX_APPOINTMENTS_PER_USER};

pub struct AppointmentService {
    appointments: Arc<AppointmentRepository>,
    hospitals: Arc<HospitalRepository>,
}

impl AppointmentService {
    pub fn new(appointments: Arc<AppointmentRepository>, hospitals: Arc<HospitalRepository>) -> Self {
        Self {
            appointments,
            hospitals,
        }
    }

    /// One page of appointments visible to `claims`.
    ///
    /// Non-admins only ever see their own bookings; `hospital_id` narrows the
    /// listing to one hospital.
    pub async fn list(
        &self,
        params: &QueryParams,
        claims: &Claims,
        hospital_id: Option<&str>,
    ) -> Result<(Vec<AppointmentResponse>, Pagination), ApiError> {
        let mut query = ListQuery::parse::<Appointment>(params);

        if !claims.is_admin() {
            query.filter.insert("user", parse_object_id(&claims.sub)?);
        }
        if let Some(hospital_id) = hospital_id {
            query.filter.insert("hospital", parse_object_id(hospital_id)?);
        }

        let total = self.appointments.count(query.filter.clone()).await?;
        let page = query.paginate(total);

        debug!(
            "Listing appointments for {}: page {} of size {} ({} matching)",
            claims.sub, page.page, page.limit, total
        );

        let appointments = self.appointments.find_page(&query, &page).await?;
        let appointments = self.populate_hospitals(appointments).await?;

        Ok((appointments, page.pagination))
    }

    pub async fn get(&self, id: &str, claims: &Claims) -> Result<AppointmentResponse, ApiError> {
        let appointment = self.find_owned(parse_object_id(id)?, claims).await?;
        let mut populated = self.populate_hospitals(vec![appointment]).await?;
        populated
            .pop()
            .ok_or_else(|| ApiError::not_found(CODE_NOT_FOUND, ERR_APPOINTMENT_NOT_FOUND))
    }

    /// Book an appointment at `hospital_id` for the caller.
    pub async fn create(
        &self,
        hospital_id: &str,
        claims: &Claims,
        req: AppointmentRequest,
    ) -> Result<AppointmentResponse, ApiError> {
        let hospital_oid = parse_object_id(hospital_id)?;
        let user_oid = parse_object_id(&claims.sub)?;

        let hospital = self
            .hospitals
            .find_by_id(hospital_oid)
            .await?
            .ok_or_else(|| ApiError::not_found(CODE_NOT_FOUND, ERR_HOSPITAL_NOT_FOUND))?;

        if !claims.is_admin() {
            let booked = self
                .appointments
                .count(mongodb::bson::doc! { "user": user_oid })
                .await?;
            if booked >= MAX_APPOINTMENTS_PER_USER {
                warn!("User {} hit the appointment limit", claims.sub);
                return Err(ApiError::bad_request(
                    CODE_APPOINTMENT_LIMIT,
                    &format!(
                        "The user with ID {} has already made {} appointments",
                        claims.sub, MAX_APPOINTMENTS_PER_USER
                    ),
                ));
            }
        }

        let appointment = Appointment {
            id: None,
            appt_date: Some(to_bson(req.appt_date)),
            user: Some(user_oid),
            hospital: Some(hospital_oid),
            created_at: Some(mongodb::bson::DateTime::now()),
        };

        let id = self.appointments.insert(&appointment).await?;
        info!("User {} booked appointment {} at {}", claims.sub, id, hospital_id);

        Ok(AppointmentResponse::from(Appointment {
            id: Some(id),
            ..appointment
        })
        .with_hospital(Some(HospitalSummary::from(&hospital))))
    }

    /// Reschedule an appointment the caller owns (or any, for admins).
    pub async fn update(
        &self,
        id: &str,
        claims: &Claims,
        req: AppointmentRequest,
    ) -> Result<AppointmentResponse, ApiError> {
        let object_id = parse_object_id(id)?;
        self.find_owned(object_id, claims).await?;

        self.appointments
            .update_date(object_id, to_bson(req.appt_date))
            .await?;
        info!("Appointment {} rescheduled by {}", id, claims.sub);

        let updated = self
            .appointments
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| ApiError::internal(ERR_FAILED_FETCH_UPDATED))?;
        let mut populated = self.populate_hospitals(vec![updated]).await?;
        populated
            .pop()
            .ok_or_else(|| ApiError::internal(ERR_FAILED_FETCH_UPDATED))
    }

    pub async fn delete(&self, id: &str, claims: &Claims) -> Result<(), ApiError> {
        let object_id = parse_object_id(id)?;
        self.find_owned(object_id, claims).await?;

        self.appointments.delete(object_id).await?;
        info!("Appointment {} deleted by {}", id, claims.sub);
        Ok(())
    }

    /// Load an appointment and check the caller owns it or is an admin.
    async fn find_owned(&self, id: ObjectId, claims: &Claims) -> Result<Appointment, ApiError> {
        let appointment = self.appointments.find_by_id(id).await?.ok_or_else(|| {
            warn!("Appointment not found with id: {}", id);
            ApiError::not_found(CODE_NOT_FOUND, ERR_APPOINTMENT_NOT_FOUND)
        })?;

        if !claims.can_access(&appointment.owner_id()) {
            warn!(
                "User {} (role: {}) attempted to access appointment {}",
                claims.sub, claims.role, id
            );
            return Err(ApiError::unauthorized(
                CODE_UNAUTHORIZED_ACCESS,
                ERR_NO_PERMISSION_APPOINTMENT,
            ));
        }

        Ok(appointment)
    }

    /// Embed a hospital summary in each appointment with one lookup per page.
    async fn populate_hospitals(
        &self,
        appointments: Vec<Appointment>,
    ) -> Result<Vec<AppointmentResponse>, ApiError> {
        let mut ids: Vec<ObjectId> = appointments.iter().filter_map(|a| a.hospital).collect();
        ids.sort();
        ids.dedup();

        let summaries: HashMap<ObjectId, HospitalSummary> = if ids.is_empty() {
            HashMap::new()
        } else {
            self.hospitals
                .find_by_ids(&ids)
                .await?
                .iter()
                .filter_map(|hospital| Some((hospital.id?, HospitalSummary::from(hospital))))
                .collect()
        };

        Ok(appointments
            .into_iter()
            .map(|appointment| {
                let summary = appointment
                    .hospital
                    .and_then(|id| summaries.get(&id).cloned());
                AppointmentResponse::from(appointment).with_hospital(summary)
            })
            .collect())
    }
}

fn to_bson(value: DateTime<Utc>) -> mongodb::bson::DateTime {
    mongodb::bson::DateTime::from_millis(value.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bson_keeps_millisecond_precision() {
        let date = DateTime::parse_from_rfc3339("2026-11-02T09:00:00.250Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(to_bson(date).timestamp_millis(), date.timestamp_millis());
    }
}
