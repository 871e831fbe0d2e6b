use std::fmt::Write;

use crate::image::ImageResult;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
.grid{display:flex;flex-wrap:wrap;gap:1rem}\
.card{width:220px}\
.card img{width:100%;height:180px;object-fit:cover}";

// posts the chosen url back as json and shows whatever message comes back
const DOWNLOAD_SCRIPT: &str = r#"<script>
async function download(button) {
  const card = button.closest('.card');
  const response = await fetch('/download', {
    method: 'POST',
    headers: {'Content-Type': 'application/json'},
    body: JSON.stringify({url: card.dataset.url, name: card.querySelector('input').value}),
  });
  const result = await response.json();
  card.querySelector('.status').textContent = result.message;
}
</script>"#;

/// Escapes text for use in element bodies and double quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        STYLE,
        body
    )
}

fn search_form(query: &str) -> String {
    format!(
        "<form method=\"post\" action=\"/\">\n<input type=\"text\" name=\"query\" value=\"{}\" placeholder=\"Search images\" required>\n<button type=\"submit\">Search</button>\n</form>",
        escape(query)
    )
}

pub fn index() -> String {
    layout("Image search", &format!("<h1>Image search</h1>\n{}", search_form("")))
}

pub fn results(query: &str, images: &[ImageResult]) -> String {
    let mut body = format!(
        "<h1>Results for &quot;{}&quot;</h1>\n{}\n",
        escape(query),
        search_form(query)
    );
    if images.is_empty() {
        body.push_str("<p class=\"empty\">No images found.</p>");
        return layout("No images found", &body);
    }
    body.push_str("<div class=\"grid\">\n");
    for (index, image) in images.iter().enumerate() {
        let url = escape(&image.url);
        let default_name = escape(&format!("{}_{}", query, index + 1));
        // writing into a String can't fail
        let _ = write!(
            body,
            "<div class=\"card\" data-url=\"{url}\">\n<img src=\"{url}\" alt=\"result {n}\" loading=\"lazy\">\n<input type=\"text\" value=\"{name}\">\n<button type=\"button\" onclick=\"download(this)\">Download</button>\n<p class=\"status\"></p>\n</div>\n",
            url = url,
            n = index + 1,
            name = default_name
        );
    }
    body.push_str("</div>\n");
    body.push_str(DOWNLOAD_SCRIPT);
    layout(&format!("Results for {}", query), &body)
}
