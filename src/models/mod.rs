pub mod solicitud;
