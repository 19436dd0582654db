use reqwest::multipart::{Form, Part};

use crate::store::{BillUpload, Result};

/// Собирает multipart форму для загрузки чека.
pub(super) fn upload_form(upload: BillUpload) -> Result<Form> {
    let mime = upload.file.mime();
    let email: String = upload.email.into();

    let file = Part::bytes(upload.file.content)
        .file_name(upload.file.name)
        .mime_str(mime.as_ref())?;

    Ok(Form::new().part("file", file).text("email", email))
}
