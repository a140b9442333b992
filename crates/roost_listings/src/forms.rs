//! Typed boundary for listing submissions.
//!
//! HTML forms post fields as `listing[title]`, `listing[price]` and so on,
//! either urlencoded or as multipart when an image file is attached. Both are
//! read into a [`ListingForm`] and validated before anything is stored.

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use roost_common::models::{ListingImage, ListingPatch, NewListing};
use roost_common::IncomingFile;
use tracing::debug;
use validator::Validate;

use crate::error::ListingError;

/// Multipart field carrying the uploaded image.
pub const IMAGE_FIELD: &str = "listing[image]";

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ListingForm {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    /// Linked image URL; blank input is read as absent.
    pub image: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: Option<String>,
    #[validate(length(min = 1, message = "country must not be empty"))]
    pub country: Option<String>,
}

impl ListingForm {
    /// Builds a form from raw name/value pairs. Later duplicates win and
    /// unknown names are ignored.
    pub fn from_fields<I>(fields: I) -> Result<Self, ListingError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut form = Self::default();
        for (name, value) in fields {
            let value = value.trim().to_string();
            match field_name(&name) {
                "title" => form.title = Some(value),
                "description" => form.description = Some(value),
                "image" => form.image = Some(value).filter(|v| !v.is_empty()),
                "price" => form.price = parse_price(&value)?,
                "location" => form.location = Some(value),
                "country" => form.country = Some(value),
                _ => {}
            }
        }
        Ok(form)
    }

    /// Checks a form meant to create a listing; every field but description
    /// and image is required.
    pub fn validate_for_create(&self) -> Result<(), ListingError> {
        self.validate()?;
        if self.title.is_none() {
            return Err(ListingError::MissingField("title"));
        }
        if self.price.is_none() {
            return Err(ListingError::MissingField("price"));
        }
        if self.location.is_none() {
            return Err(ListingError::MissingField("location"));
        }
        if self.country.is_none() {
            return Err(ListingError::MissingField("country"));
        }
        Ok(())
    }

    pub fn validate_for_update(&self) -> Result<(), ListingError> {
        self.validate()?;
        Ok(())
    }

    /// Turns a form that passed [`Self::validate_for_create`] into a new
    /// listing owned by `owner_id`.
    pub fn into_new_listing(
        self,
        owner_id: String,
        uploaded: Option<ListingImage>,
    ) -> Result<NewListing, ListingError> {
        let image = ImageSource::resolve(uploaded, self.image).into_image();
        Ok(NewListing {
            title: self.title.ok_or(ListingError::MissingField("title"))?,
            description: self.description.unwrap_or_default(),
            image,
            price: self.price.ok_or(ListingError::MissingField("price"))?,
            location: self.location.ok_or(ListingError::MissingField("location"))?,
            country: self.country.ok_or(ListingError::MissingField("country"))?,
            owner_id,
        })
    }

    /// Turns a form that passed [`Self::validate_for_update`] into a partial
    /// update. Absent fields stay as stored.
    pub fn into_patch(self, uploaded: Option<ListingImage>) -> ListingPatch {
        ListingPatch {
            image: ImageSource::resolve(uploaded, self.image).into_image(),
            title: self.title,
            description: self.description,
            price: self.price,
            location: self.location,
            country: self.country,
        }
    }
}

/// `listing[title]` and `title` both name the title field.
fn field_name(raw: &str) -> &str {
    raw.strip_prefix("listing[")
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(raw)
}

fn parse_price(value: &str) -> Result<Option<f64>, ListingError> {
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(Some(price)),
        _ => Err(ListingError::InvalidPrice(value.to_string())),
    }
}

/// Where a submission's image comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// A file stored during this request.
    Uploaded(ListingImage),
    /// A URL typed into the form.
    Linked(String),
    /// Nothing supplied: keep the stored image, or use the default on create.
    Unset,
}

impl ImageSource {
    /// An upload wins over a linked URL.
    pub fn resolve(uploaded: Option<ListingImage>, linked: Option<String>) -> Self {
        match (uploaded, linked) {
            (Some(image), _) => Self::Uploaded(image),
            (None, Some(url)) if !url.trim().is_empty() => Self::Linked(url.trim().to_string()),
            _ => Self::Unset,
        }
    }

    pub fn into_image(self) -> Option<ListingImage> {
        match self {
            Self::Uploaded(image) => Some(image),
            Self::Linked(url) => Some(ListingImage {
                filename: filename_from_url(&url),
                url,
            }),
            Self::Unset => None,
        }
    }
}

/// Last path segment of a URL, without query or fragment.
pub fn filename_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
        .to_string()
}

/// A listing form plus the image file that came with it, if any.
#[derive(Debug, Clone)]
pub struct ListingSubmission {
    pub form: ListingForm,
    pub file: Option<IncomingFile>,
}

impl<S> FromRequest<S> for ListingSubmission
where
    S: Send + Sync,
{
    type Rejection = ListingError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| ListingError::BadRequest(e.body_text()))?;
            return Ok(Self {
                form: ListingForm::from_fields(fields)?,
                file: None,
            });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ListingError::BadRequest(e.body_text()))?;

        let mut fields = Vec::new();
        let mut file = None;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ListingError::BadRequest(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(file_name) = field.file_name().map(str::to_string) {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ListingError::BadRequest(e.body_text()))?;

                // Browsers send an empty part when no file was picked
                if name == IMAGE_FIELD && !file_name.is_empty() && !bytes.is_empty() {
                    debug!("Received image upload {} ({} bytes)", file_name, bytes.len());
                    file = Some(IncomingFile {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| ListingError::BadRequest(e.body_text()))?;
            fields.push((name, value));
        }

        Ok(Self {
            form: ListingForm::from_fields(fields)?,
            file,
        })
    }
}
