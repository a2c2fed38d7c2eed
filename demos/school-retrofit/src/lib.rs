use wasm_bindgen::prelude::*;

mod activity;
use activity::SchoolRetrofit;

assistive_web::export_activity!(SchoolRetrofit, "school-retrofit");
