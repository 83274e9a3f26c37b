pub mod blog;
pub mod catalog;

use vitrine_kernel::ModuleRegistry;

/// Register all vitrine modules with the registry
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(catalog::create_module());
    registry.register(blog::create_module());
}
