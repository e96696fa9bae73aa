//! Admin dashboard endpoints.
//!
//! Every call here expects a client built with [`BackendClient::with_token`].
//! Forms are checked locally before a request leaves the process.

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tourism_core::forms::{
    NamedForm, OperatingHourForm, PlaceForm, SeasonForm, SeasonRelationForm, UploadFile,
};
use tourism_core::image_url::ResolveImages;
use tourism_core::list_state::{Identified, ListState};
use tourism_core::models::{
    Category, District, Image, OperatingHour, Place, Season, SeasonRelation,
};
use tourism_core::types::DbId;

use crate::error::ClientResult;
use crate::http::BackendClient;

/// A record managed under an `/admin/...` collection.
pub trait AdminResource: Identified + DeserializeOwned {
    /// Collection path, e.g. `/admin/districts`.
    const PATH: &'static str;
    /// Human-readable name for log lines.
    const NAME: &'static str;
}

macro_rules! admin_resource {
    ($($ty:ty => $path:literal, $name:literal;)*) => {
        $(impl AdminResource for $ty {
            const PATH: &'static str = $path;
            const NAME: &'static str = $name;
        })*
    };
}

admin_resource! {
    Place => "/admin/place", "place";
    Image => "/admin/images", "image";
    District => "/admin/districts", "district";
    Category => "/admin/categories", "category";
    Season => "/admin/seasons", "season";
    OperatingHour => "/admin/time", "operating_hour";
    SeasonRelation => "/admin/seasons-relation", "season_relation";
}

/// Lookup lists needed before the place form can render.
#[derive(Debug, Clone, Serialize)]
pub struct FormOptions {
    pub districts: Vec<District>,
    pub categories: Vec<Category>,
    pub seasons: Vec<Season>,
}

fn file_part(file: &UploadFile) -> ClientResult<Part> {
    Ok(Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(&file.content_type)?)
}

fn place_multipart(form: &PlaceForm) -> ClientResult<Form> {
    let mut multipart = Form::new();
    for (name, value) in form.text_fields()? {
        multipart = multipart.text(name, value);
    }
    for image in &form.images {
        multipart = multipart.part("images", file_part(image)?);
    }
    Ok(multipart)
}

impl BackendClient {
    // ---- generic collection helpers ----

    /// GET the whole admin collection for `T`.
    pub async fn admin_list<T: AdminResource>(&self) -> ClientResult<Vec<T>> {
        self.get_json(T::PATH).await
    }

    /// GET one record of `T`.
    pub async fn admin_get<T: AdminResource>(&self, id: DbId) -> ClientResult<T> {
        self.get_json(&format!("{}/{id}", T::PATH)).await
    }

    async fn admin_create<T: AdminResource, B: Serialize + ?Sized>(&self, body: &B) -> ClientResult<T> {
        let created: T = self
            .send_json(self.request(Method::POST, T::PATH).json(body))
            .await?;
        tracing::info!(entity = T::NAME, id = ?created.id(), "Created");
        Ok(created)
    }

    async fn admin_update<T: AdminResource, B: Serialize + ?Sized>(
        &self,
        id: DbId,
        body: &B,
    ) -> ClientResult<T> {
        let updated: T = self
            .send_json(
                self.request(Method::PUT, &format!("{}/{id}", T::PATH))
                    .json(body),
            )
            .await?;
        tracing::info!(entity = T::NAME, id, "Updated");
        Ok(updated)
    }

    /// DELETE one record of `T`.
    pub async fn admin_delete<T: AdminResource>(&self, id: DbId) -> ClientResult<()> {
        self.send_unit(self.request(Method::DELETE, &format!("{}/{id}", T::PATH)))
            .await?;
        tracing::info!(entity = T::NAME, id, "Deleted");
        Ok(())
    }

    /// Delete `id` on the backend, then drop it from `list`.
    ///
    /// A failed delete leaves `list` untouched.
    pub async fn delete_from<T: AdminResource>(
        &self,
        list: &mut ListState<T>,
        id: DbId,
    ) -> ClientResult<()> {
        let result = self.admin_delete::<T>(id).await;
        list.apply_delete(id, result)
    }

    // ---- places ----

    pub async fn admin_list_places(&self) -> ClientResult<Vec<Place>> {
        let mut places: Vec<Place> = self.admin_list().await?;
        places.resolve_images(self.base_url());
        Ok(places)
    }

    pub async fn admin_get_place(&self, id: DbId) -> ClientResult<Place> {
        let mut place: Place = self.admin_get(id).await?;
        place.resolve_images(self.base_url());
        Ok(place)
    }

    /// POST /admin/place as `multipart/form-data`.
    pub async fn create_place(&self, form: &PlaceForm) -> ClientResult<Place> {
        form.check()?;
        let builder = self
            .request(Method::POST, Place::PATH)
            .multipart(place_multipart(form)?);
        let place: Place = self.send_resolved(builder).await?;
        tracing::info!(place_id = place.id, images = form.images.len(), "Place created");
        Ok(place)
    }

    /// PUT /admin/place/{id} as `multipart/form-data`.
    pub async fn update_place(&self, id: DbId, form: &PlaceForm) -> ClientResult<Place> {
        form.check()?;
        let builder = self
            .request(Method::PUT, &format!("{}/{id}", Place::PATH))
            .multipart(place_multipart(form)?);
        let place: Place = self.send_resolved(builder).await?;
        tracing::info!(place_id = id, "Place updated");
        Ok(place)
    }

    pub async fn delete_place(&self, id: DbId) -> ClientResult<()> {
        self.admin_delete::<Place>(id).await
    }

    // ---- images ----

    /// POST /admin/images with the files and the owning `place_id`.
    pub async fn upload_images(
        &self,
        place_id: DbId,
        files: &[UploadFile],
    ) -> ClientResult<Vec<Image>> {
        let mut multipart = Form::new().text("place_id", place_id.to_string());
        for file in files {
            file.check()?;
            multipart = multipart.part("images", file_part(file)?);
        }

        let images: Vec<Image> = self
            .send_resolved(self.request(Method::POST, Image::PATH).multipart(multipart))
            .await?;
        tracing::info!(place_id, count = images.len(), "Images uploaded");
        Ok(images)
    }

    pub async fn delete_image(&self, id: DbId) -> ClientResult<()> {
        self.admin_delete::<Image>(id).await
    }

    // ---- districts / categories ----

    pub async fn create_district(&self, form: &NamedForm) -> ClientResult<District> {
        form.check()?;
        self.admin_create::<District, _>(form).await
    }

    pub async fn update_district(&self, id: DbId, form: &NamedForm) -> ClientResult<District> {
        form.check()?;
        self.admin_update::<District, _>(id, form).await
    }

    pub async fn create_category(&self, form: &NamedForm) -> ClientResult<Category> {
        form.check()?;
        self.admin_create::<Category, _>(form).await
    }

    pub async fn update_category(&self, id: DbId, form: &NamedForm) -> ClientResult<Category> {
        form.check()?;
        self.admin_update::<Category, _>(id, form).await
    }

    // ---- seasons ----

    pub async fn create_season(&self, form: &SeasonForm) -> ClientResult<Season> {
        form.check()?;
        self.admin_create::<Season, _>(form).await
    }

    pub async fn update_season(&self, id: DbId, form: &SeasonForm) -> ClientResult<Season> {
        form.check()?;
        self.admin_update::<Season, _>(id, form).await
    }

    // ---- operating hours ----

    pub async fn create_operating_hour(
        &self,
        form: &OperatingHourForm,
    ) -> ClientResult<OperatingHour> {
        form.check()?;
        self.admin_create::<OperatingHour, _>(form).await
    }

    pub async fn update_operating_hour(
        &self,
        id: DbId,
        form: &OperatingHourForm,
    ) -> ClientResult<OperatingHour> {
        form.check()?;
        self.admin_update::<OperatingHour, _>(id, form).await
    }

    // ---- season relations ----

    pub async fn create_season_relation(
        &self,
        form: &SeasonRelationForm,
    ) -> ClientResult<SeasonRelation> {
        self.admin_create::<SeasonRelation, _>(form).await
    }

    pub async fn update_season_relation(
        &self,
        id: DbId,
        form: &SeasonRelationForm,
    ) -> ClientResult<SeasonRelation> {
        self.admin_update::<SeasonRelation, _>(id, form).await
    }

    // ---- batches ----

    /// Fetch districts, categories and seasons in one parallel batch.
    /// Any single failure fails the whole batch.
    pub async fn form_options(&self) -> ClientResult<FormOptions> {
        let (districts, categories, seasons) = futures::try_join!(
            self.admin_list::<District>(),
            self.admin_list::<Category>(),
            self.admin_list::<Season>(),
        )?;

        Ok(FormOptions {
            districts,
            categories,
            seasons,
        })
    }
}
