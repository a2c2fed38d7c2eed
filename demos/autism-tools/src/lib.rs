use wasm_bindgen::prelude::*;

mod activity;
use activity::AutismTools;

assistive_web::export_activity!(AutismTools, "autism-tools");
