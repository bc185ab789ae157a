use crate::routes::{booking, health, room, user};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        room::create_room,
        room::list_rooms,
        room::get_room,
        room::update_room,
        room::delete_room,
        booking::create_booking,
        booking::list_bookings,
        booking::get_booking,
        booking::update_booking,
        booking::delete_booking,
        user::me,
        user::create_user,
        user::get_user
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Rooms", description = "Room related endpoints"),
        (name = "Bookings", description = "Booking related endpoints"),
        (name = "Users", description = "Users provisioned from the identity provider"),
    ),
    info(
        title = "Hotel Booking API",
        version = "1.0.0",
        description = "Rooms and bookings management",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
