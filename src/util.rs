use hashbrown::HashMap;

lazy_static! {
    /// The only functions an expression may call
    pub static ref FUNCTIONS: HashMap<&'static str, fn(f64) -> f64> = {
        let mut map = HashMap::<&'static str, fn(f64) -> f64>::new();
        map.insert("sqrt", libm::sqrt);
        map.insert("sin", libm::sin);
        map.insert("cos", libm::cos);
        map.insert("tan", libm::tan);
        map.insert("log10", libm::log10);
        map.shrink_to_fit();
        map
    };

    /// The only constants an expression may reference
    pub static ref CONSTANTS: HashMap<&'static str, f64> = {
        let mut map = HashMap::<&'static str, f64>::new();
        map.insert("pi", std::f64::consts::PI);
        map.insert("e", std::f64::consts::E);
        map.shrink_to_fit();
        map
    };
}

/// Check if `name` is a callable function of the symbol table
pub fn is_function(name: &str) -> bool {
    FUNCTIONS.contains_key(name)
}
