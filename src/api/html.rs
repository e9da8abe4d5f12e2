//! Upload form and browser-friendly result page

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Upload form served on GET and embedded ahead of conversion results.
pub const UPLOAD_FORM: &str = r#"
<meta name="viewport" content="width=device-width, initial-scale=1">
<style>input { font-size: 4vw; }</style>
<form action="/" method="post" enctype="multipart/form-data">
    <input type="file" name="f" />
    <input type="submit" value="Convert" />
</form>
"#;

/// Click handler that synthesizes a download link for the embedded image.
/// Firefox requires the link to be attached to the body before clicking.
const DOWNLOAD_SCRIPT: &str = r#"
    var link = document.createElement("a");
    link.download = this.getAttribute("download");
    link.href = this.getAttribute("src");
    document.body.appendChild(link);
    link.click();
    document.body.removeChild(link);
"#;

/// Derive the download filename from the uploaded name and the output MIME
/// type, e.g. `photo.png` + `image/jpeg` -> `photo-instaxify.jpeg`.
pub fn download_filename(original: &str, mime: &str) -> String {
    let stem = original
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(original);
    let ext = mime.strip_prefix("image/").unwrap_or("jpg");
    format!("{stem}-instaxify.{ext}")
}

/// Form plus the converted image embedded as a base64 data URI with a
/// click-to-download handler, for interactive clients. The image is never
/// stored server-side, so the page carries the whole payload.
pub fn result_page(image: &[u8], mime: &str, filename: &str) -> String {
    format!(
        "{UPLOAD_FORM}<img download='{filename}' src='data:{mime};base64,{data}'\n onClick='{DOWNLOAD_SCRIPT}' width='100%' />",
        data = BASE64.encode(image),
    )
}
