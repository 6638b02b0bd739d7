//! The fixed set of built-in operators. Their names are reserved words:
//! the lexer turns them into `Operator` tokens and refuses them as binders.

macro_rules! operators {
    ($($variant:ident => $name:literal / $arity:literal,)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Operator {
            $($variant,)*
        }

        impl Operator {
            pub const ALL: &'static [Operator] = &[$(Operator::$variant,)*];

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)*
                    _ => None,
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// Number of stack operands the operator pops.
            pub fn arity(self) -> usize {
                match self {
                    $(Self::$variant => $arity,)*
                }
            }
        }
    };
}

operators! {
    Acos       => "acos"       / 1,
    AddI       => "addi"       / 2,
    AddF       => "addf"       / 2,
    Apply      => "apply"      / 1,
    Asin       => "asin"       / 1,
    ClampF     => "clampf"     / 1,
    Cone       => "cone"       / 1,
    Cos        => "cos"        / 1,
    Cube       => "cube"       / 1,
    Cylinder   => "cylinder"   / 1,
    Difference => "difference" / 2,
    DivI       => "divi"       / 2,
    DivF       => "divf"       / 2,
    EqI        => "eqi"        / 2,
    EqF        => "eqf"        / 2,
    Floor      => "floor"      / 1,
    Frac       => "frac"       / 1,
    Get        => "get"        / 2,
    GetX       => "getx"       / 1,
    GetY       => "gety"       / 1,
    GetZ       => "getz"       / 1,
    If         => "if"         / 3,
    Intersect  => "intersect"  / 2,
    Length     => "length"     / 1,
    LessI      => "lessi"      / 2,
    LessF      => "lessf"      / 2,
    Light      => "light"      / 2,
    ModI       => "modi"       / 2,
    MulI       => "muli"       / 2,
    MulF       => "mulf"       / 2,
    NegI       => "negi"       / 1,
    NegF       => "negf"       / 1,
    Plane      => "plane"      / 1,
    Point      => "point"      / 3,
    PointLight => "pointlight" / 2,
    Real       => "real"       / 1,
    Render     => "render"     / 8,
    RotateX    => "rotatex"    / 2,
    RotateY    => "rotatey"    / 2,
    RotateZ    => "rotatez"    / 2,
    Scale      => "scale"      / 4,
    Sin        => "sin"        / 1,
    Sphere     => "sphere"     / 1,
    SpotLight  => "spotlight"  / 5,
    Sqrt       => "sqrt"       / 1,
    SubI       => "subi"       / 2,
    SubF       => "subf"       / 2,
    Translate  => "translate"  / 4,
    Union      => "union"      / 2,
    UScale     => "uscale"     / 2,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifty_reserved_words() {
        assert_eq!(Operator::ALL.len(), 50);
    }

    #[test]
    fn names_round_trip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_name(op.name()), Some(*op));
        }
    }

    #[test]
    fn plain_identifiers_are_not_operators() {
        assert_eq!(Operator::from_name("fact"), None);
        assert_eq!(Operator::from_name("true"), None);
        assert_eq!(Operator::from_name("Addi"), None);
    }
}
