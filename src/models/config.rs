/// Process-wide settings of the public storefront.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Site whose pages are served on the public routes.
    pub site_id: i32,
}
