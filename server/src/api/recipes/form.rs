//! Multipart form shared by the create and update handlers.

use axum::extract::Multipart;
use receptsamling_core::ImageUpload;

/// Image extensions accepted at the boundary. Anything else is rejected
/// before the payload reaches the repository.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Check a client-supplied filename against the extension allowlist.
pub fn allowed_image(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Fields of the recipe form, as submitted by the web client.
#[derive(Debug, Default)]
pub struct RecipeForm {
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub image: Option<ImageUpload>,
    pub remove_image: bool,
}

impl RecipeForm {
    /// Read the multipart body into a form. Returns a user-facing message
    /// on malformed input or a disallowed image extension.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, String> {
        let mut form = RecipeForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| format!("Failed to read form data: {}", e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match name.as_str() {
                "title" => form.title = read_text(field, &name).await?,
                "description" => form.description = read_text(field, &name).await?,
                "ingredients" => form.ingredients = read_text(field, &name).await?,
                "instructions" => form.instructions = read_text(field, &name).await?,
                "remove_image" => {
                    let value = read_text(field, &name).await?;
                    form.remove_image = matches!(value.as_str(), "true" | "1" | "on");
                }
                "image" => {
                    // A file input with nothing selected still submits an
                    // empty part; treat that as "no image".
                    let filename = field.file_name().unwrap_or_default().to_string();
                    if filename.is_empty() {
                        continue;
                    }
                    if !allowed_image(&filename) {
                        return Err(format!(
                            "Unsupported image format. Allowed formats: {}.",
                            ALLOWED_IMAGE_EXTENSIONS.join(", ")
                        ));
                    }
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| format!("Failed to read image data: {}", e.body_text()))?;
                    if data.is_empty() {
                        continue;
                    }
                    form.image = Some(ImageUpload {
                        data: data.to_vec(),
                        content_type,
                        filename,
                    });
                }
                _ => {}
            }
        }

        form.title = form.title.trim().to_string();
        form.description = form.description.trim().to_string();
        form.instructions = form.instructions.trim().to_string();

        Ok(form)
    }
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, String> {
    field
        .text()
        .await
        .map_err(|e| format!("Failed to read field '{}': {}", name, e.body_text()))
}
