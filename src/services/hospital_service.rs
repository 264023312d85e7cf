//! Hospital service: filtered listings, CRUD, and appointment populate.

use log::{debug, info, warn};
use mongodb::bson::{doc, oid::ObjectId, Document};
use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::{CODE_NOT_FOUND, ERR_FAILED_FETCH_UPDATED, ERR_HOSPITAL_NOT_FOUND};
use crate::errors::ApiError;
use crate::models::{
    AppointmentResponse, CreateHospitalRequest, Hospital, HospitalResponse, UpdateHospitalRequest,
};
use crate::query::{ListQuery, Pagination, QueryParams};
use crate::repositories::{AppointmentRepository, HospitalRepository};
use crate::validators::parse_object_id;

pub struct HospitalService {
    hospitals: Arc<HospitalRepository>,
    appointments: Arc<AppointmentRepository>,
}

impl HospitalService {
    pub fn new(hospitals: Arc<HospitalRepository>, appointments: Arc<AppointmentRepository>) -> Self {
        Self {
            hospitals,
            appointments,
        }
    }

    /// One page of hospitals matching the query-string filters.
    pub async fn list(
        &self,
        params: &QueryParams,
    ) -> Result<(Vec<HospitalResponse>, Pagination), ApiError> {
        let query = ListQuery::parse::<Hospital>(params);
        let total = self.hospitals.count(query.filter.clone()).await?;
        let page = query.paginate(total);

        debug!(
            "Listing hospitals: page {} of size {} ({} matching)",
            page.page, page.limit, total
        );

        let hospitals = self.hospitals.find_page(&query, &page).await?;
        let hospitals = self.populate_appointments(hospitals).await?;

        Ok((hospitals, page.pagination))
    }

    pub async fn get(&self, id: &str) -> Result<HospitalResponse, ApiError> {
        let hospital = self.find_existing(parse_object_id(id)?).await?;
        let mut populated = self.populate_appointments(vec![hospital]).await?;
        populated
            .pop()
            .ok_or_else(|| ApiError::not_found(CODE_NOT_FOUND, ERR_HOSPITAL_NOT_FOUND))
    }

    pub async fn create(&self, req: CreateHospitalRequest) -> Result<HospitalResponse, ApiError> {
        let hospital = Hospital {
            id: None,
            name: Some(req.name.trim().to_string()),
            address: Some(req.address),
            district: Some(req.district),
            province: Some(req.province),
            postalcode: Some(req.postalcode),
            tel: req.tel,
            region: Some(req.region),
            created_at: Some(mongodb::bson::DateTime::now()),
        };

        let id = self.hospitals.insert(&hospital).await?;
        info!("Created hospital {}", id);

        Ok(HospitalResponse::from(Hospital {
            id: Some(id),
            ..hospital
        }))
    }

    /// Apply the supplied fields; an empty update returns the hospital unchanged.
    pub async fn update(
        &self,
        id: &str,
        req: UpdateHospitalRequest,
    ) -> Result<HospitalResponse, ApiError> {
        let object_id = parse_object_id(id)?;
        let existing = self.find_existing(object_id).await?;

        let changes = update_document(req);
        if changes.is_empty() {
            debug!("No changes supplied for hospital {}", id);
            return Ok(existing.into());
        }

        self.hospitals.update(object_id, changes).await?;
        info!("Updated hospital {}", id);

        self.hospitals
            .find_by_id(object_id)
            .await?
            .map(HospitalResponse::from)
            .ok_or_else(|| ApiError::internal(ERR_FAILED_FETCH_UPDATED))
    }

    /// Delete a hospital together with every appointment booked there.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let object_id = parse_object_id(id)?;
        self.find_existing(object_id).await?;

        let removed = self.appointments.delete_by_hospital(object_id).await?;
        let result = self.hospitals.delete(object_id).await?;

        if result.deleted_count == 0 {
            warn!("Hospital {} vanished before it could be deleted", id);
            return Err(ApiError::not_found(CODE_NOT_FOUND, ERR_HOSPITAL_NOT_FOUND));
        }

        info!("Deleted hospital {} and {} appointments", id, removed);
        Ok(())
    }

    async fn find_existing(&self, id: ObjectId) -> Result<Hospital, ApiError> {
        self.hospitals.find_by_id(id).await?.ok_or_else(|| {
            warn!("Hospital not found with id: {}", id);
            ApiError::not_found(CODE_NOT_FOUND, ERR_HOSPITAL_NOT_FOUND)
        })
    }

    /// Attach each hospital's appointments with one lookup for the whole page.
    ///
    /// Hospitals projected without `_id` cannot be joined and are returned as is.
    async fn populate_appointments(
        &self,
        hospitals: Vec<Hospital>,
    ) -> Result<Vec<HospitalResponse>, ApiError> {
        let ids: Vec<ObjectId> = hospitals.iter().filter_map(|h| h.id).collect();

        let mut booked: HashMap<ObjectId, Vec<AppointmentResponse>> = HashMap::new();
        if !ids.is_empty() {
            for appointment in self.appointments.find_by_hospitals(&ids).await? {
                if let Some(hospital_id) = appointment.hospital {
                    booked
                        .entry(hospital_id)
                        .or_default()
                        .push(appointment.into());
                }
            }
        }

        Ok(hospitals
            .into_iter()
            .map(|hospital| match hospital.id {
                Some(id) => {
                    let appointments = booked.remove(&id).unwrap_or_default();
                    HospitalResponse::from(hospital).with_appointments(appointments)
                }
                None => HospitalResponse::from(hospital),
            })
            .collect())
    }
}

/// `$set` body for the fields present in `req`.
fn update_document(req: UpdateHospitalRequest) -> Document {
    let mut changes = doc! {};
    let fields = [
        ("name", req.name.map(|name| name.trim().to_string())),
        ("address", req.address),
        ("district", req.district),
        ("province", req.province),
        ("postalcode", req.postalcode),
        ("tel", req.tel),
        ("region", req.region),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            changes.insert(field, value);
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_document_only_includes_supplied_fields() {
        let req = UpdateHospitalRequest {
            name: Some("  Siriraj ".to_string()),
            tel: Some("02-4197000".to_string()),
            ..Default::default()
        };
        assert_eq!(
            update_document(req),
            doc! { "name": "Siriraj", "tel": "02-4197000" }
        );
    }

    #[test]
    fn test_empty_update_document() {
        assert!(update_document(UpdateHospitalRequest::default()).is_empty());
    }
}
