//! Appointment repository for all MongoDB operations related to appointments.

use futures::TryStreamExt;
use log::{debug, info};
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::{Collection, Database, IndexModel};

use crate::constants::COLLECTION_APPOINTMENTS;
use crate::errors::ApiError;
use crate::models::Appointment;
use crate::query::{ListQuery, PaginationState};

/// Repository for appointment-related database operations.
pub struct AppointmentRepository {
    collection: Collection<Appointment>,
}

impl AppointmentRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_APPOINTMENTS),
        }
    }

    /// Index the two reference fields used for ownership and populate lookups.
    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        info!("Creating database indexes for appointments collection...");

        let indexes = vec![
            IndexModel::builder().keys(doc! { "user": 1 }).build(),
            IndexModel::builder().keys(doc! { "hospital": 1 }).build(),
        ];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }

    pub async fn insert(&self, appointment: &Appointment) -> Result<ObjectId, ApiError> {
        let result = self.collection.insert_one(appointment).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::internal("Inserted appointment has no ObjectId"))
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Appointment>, ApiError> {
        debug!("Repository: Finding appointment by ID: {}", id);
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    /// All appointments booked at any of `hospital_ids`.
    pub async fn find_by_hospitals(
        &self,
        hospital_ids: &[ObjectId],
    ) -> Result<Vec<Appointment>, ApiError> {
        let cursor = self
            .collection
            .find(doc! { "hospital": { "$in": hospital_ids.to_vec() } })
            .sort(doc! { "appt_date": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    /// One page of a translated listing.
    pub async fn find_page(
        &self,
        query: &ListQuery,
        page: &PaginationState,
    ) -> Result<Vec<Appointment>, ApiError> {
        debug!(
            "Repository: Finding appointments with filter: {:?}, sort: {:?}",
            query.filter, query.sort
        );

        let mut find = self
            .collection
            .find(query.filter.clone())
            .sort(query.sort_document())
            .skip(page.start_index)
            .limit(page.limit_i64());

        if let Some(projection) = query.projection() {
            find = find.projection(projection);
        }

        Ok(find.await?.try_collect().await?)
    }

    pub async fn count(&self, filter: Document) -> Result<u64, ApiError> {
        Ok(self.collection.count_documents(filter).await?)
    }

    pub async fn update_date(&self, id: ObjectId, appt_date: DateTime) -> Result<(), ApiError> {
        self.collection
            .update_one(doc! { "_id": id }, doc! { "$set": { "appt_date": appt_date } })
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: ObjectId) -> Result<(), ApiError> {
        self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(())
    }

    /// Remove every appointment booked at `hospital_id`, returning how many.
    pub async fn delete_by_hospital(&self, hospital_id: ObjectId) -> Result<u64, ApiError> {
        let result = self
            .collection
            .delete_many(doc! { "hospital": hospital_id })
            .await?;
        Ok(result.deleted_count)
    }
}
