mod api;
mod cors;
mod db;
mod error;
mod schema;
mod service;
mod settings;
mod store;

#[macro_use]
extern crate rocket;
#[macro_use]
extern crate diesel;
extern crate dotenv;
#[macro_use]
extern crate diesel_migrations;

use cors::CORS;
use db::{run_db_migrations, DbConn};
use rocket::fairing::AdHoc;
use settings::Settings;

#[launch]
async fn rocket() -> _ {
    dotenv::dotenv().ok();

    let settings = Settings::new().expect("valid settings");

    rocket::build()
        .attach(DbConn::fairing())
        .attach(AdHoc::on_ignite("Run migrations", run_db_migrations))
        .attach(CORS::new(settings.allowed_origin.clone()))
        .manage(settings)
        .register(
            "/",
            catchers![
                error::bad_request,
                error::unauthorized,
                error::forbidden,
                error::not_found,
                error::unprocessable,
                error::internal_error,
            ],
        )
        .mount("/", routes![cors::preflight])
        .mount(
            "/api/v1/",
            routes![
                api::user_management::me::me,
                api::user_management::admin::get_users,
                api::user_management::admin::delete_users,
                api::user_management::admin::update_users,
                api::inventory_management::create::create_inventory,
                api::inventory_management::list::my_inventories,
                api::inventory_management::list::shared_inventories,
                api::inventory_management::list::public_inventories,
                api::inventory_management::list::all_inventories,
                api::inventory_management::get_inventory::get_inventory,
                api::inventory_management::get_inventory::get_inventory_fields,
                api::inventory_management::get_inventory::get_inventory_tags,
                api::inventory_management::get_inventory::get_custom_id_format,
                api::inventory_management::update::update_inventory,
                api::inventory_management::delete::delete_inventories,
                api::inventory_management::access::check_user_access,
                api::inventory_management::access::users_with_access,
                api::inventory_management::access::bulk_update_access,
                api::item_management::create::create_item,
                api::item_management::list::list_items,
                api::item_management::delete::delete_items,
                api::metadata::search::search_tags,
                api::metadata::search::search_categories,
            ],
        )
}
