//! Static upload form served at `GET /form`.

use axum::response::Html;

pub async fn form() -> Html<&'static str> {
    Html(FORM)
}

const FORM: &str = r#"<!DOCTYPE html>
<html>
<body>
<form action="/" method="post" enctype="multipart/form-data">
	file: <input type="file" name="file">
	<button type="submit">Submit</button>
	<br>

	w/h (size):
	<input type="text" name="w" value="200">
	<input type="text" name="h" value="200">
	<br>
	jpeg: <input type="text" name="jpeg" value="90">
	<br>

	interp: <select name="interp">
		<option value="">Default</option>
		<option value="None">No resize</option>
		<option value="NearestNeighbor">NearestNeighbor</option>
		<option value="Bilinear">Bilinear</option>
		<option value="Bicubic">Bicubic</option>
		<option value="MitchellNetravali">MitchellNetravali</option>
		<option value="Lanczos2">Lanczos2</option>
		<option value="Lanczos3">Lanczos3</option>
	</select>

	<br>
	<br>
	Just POST with
	[file (required), w(=200), h(=200), interp(=NearestNeighbor), jpeg(=90)]
	options.
	<br>
	interp option case-insensitive
	<br>
	if jpeg not valid, output is png-file.
	<br>
	accepted files: .png .gif .jpg .jpeg .svg .webm
</form>
</body>
</html>
"#;
