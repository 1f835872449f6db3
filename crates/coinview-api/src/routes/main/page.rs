//! Main page rendering

use crate::{outlet_link, page_response};

pub async fn page_main(headers: axum::http::HeaderMap) -> axum::response::Html<String> {
    let inner_content = format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6'>
            <h1 class='text-2xl font-bold mb-2'>Crypto Prices</h1>
            <p class='text-gray-600 mb-4'>This is the application main page.</p>
            <p class='text-gray-600'>Pick a coin from the {} list to see its current exchange rate.</p>
        </div>"#,
        outlet_link("/currencies", "text-indigo-600 underline", "currencies")
    );

    axum::response::Html(page_response(&headers, "Crypto Prices", "/", &inner_content))
}
