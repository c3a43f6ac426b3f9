use crate::evaluator;
use crate::types::{Arity, LispFloat, LispInt, LispObject, PrimitiveFn, TypeMismatch};

fn as_float(obj: &LispObject) -> Result<LispFloat, TypeMismatch> {
    match obj {
        LispObject::Integer(x) => Ok(*x as LispFloat),
        LispObject::Float(x) => Ok(*x),
        _ => Err(TypeMismatch::NotANumber),
    }
}

fn arithmetic_(
    args: &[LispObject],
    name: &'static str,
    int_op: fn(LispInt, LispInt) -> Option<LispInt>,
    float_op: fn(LispFloat, LispFloat) -> LispFloat,
) -> evaluator::Result {
    match (&args[0], &args[1]) {
        (LispObject::Integer(x), LispObject::Integer(y)) => int_op(*x, *y)
            .map(LispObject::Integer)
            .ok_or(evaluator::Error::IntegerOverflow(name)),
        (x, y) => Ok(LispObject::Float(float_op(as_float(x)?, as_float(y)?))),
    }
}

// Integers stay integers; any float operand makes the result a float.
// Integer results outside the LispInt range are an error, never wrapped.
macro_rules! arithmetic_primitive {
    ($SYMBOL:tt, $NAME:ident) => {
        paste::item! {
            static $NAME: PrimitiveFn = PrimitiveFn {
                name: stringify!($SYMBOL),
                fn_ptr: |args: &[LispObject]| {
                    arithmetic_(
                        args,
                        stringify!($SYMBOL),
                        LispInt:: [<checked_ $NAME:lower>],
                        |x: LispFloat, y: LispFloat| x $SYMBOL y,
                    )
                },
                arity: Arity::exactly(2),
            };
        }
    };
}

arithmetic_primitive!(+, ADD);
arithmetic_primitive!(-, SUB);
arithmetic_primitive!(*, MUL);

static DIV: PrimitiveFn = PrimitiveFn {
    name: "/",
    fn_ptr: div_,
    arity: Arity::exactly(2),
};

fn div_(args: &[LispObject]) -> evaluator::Result {
    let x = as_float(&args[0])?;
    let y = as_float(&args[1])?;
    match y == 0.0 {
        true => Err(evaluator::Error::DivideByZero),
        false => Ok(LispObject::Float(x / y)),
    }
}

static EQUAL: PrimitiveFn = PrimitiveFn {
    name: "eq?",
    fn_ptr: equal_,
    arity: Arity::exactly(2),
};

fn equal_(args: &[LispObject]) -> evaluator::Result {
    Ok(LispObject::Bool(args[0] == args[1]))
}

static CONS: PrimitiveFn = PrimitiveFn {
    name: "cons",
    fn_ptr: cons_,
    arity: Arity::exactly(2),
};

fn cons_(args: &[LispObject]) -> evaluator::Result {
    let head = &args[0];
    let mut elements = vec![head.clone()];
    match args[1].as_list() {
        Ok(tail) => elements.extend(tail.iter().cloned()),
        Err(_) => elements.push(args[1].clone()),
    }
    Ok(LispObject::wrap_list(elements))
}

static CAR: PrimitiveFn = PrimitiveFn {
    name: "car",
    fn_ptr: car_,
    arity: Arity::exactly(1),
};

fn car_(args: &[LispObject]) -> evaluator::Result {
    let seq = args[0].as_list()?;
    seq.first()
        .cloned()
        .ok_or_else(|| evaluator::Error::BadIndex(0, 0..seq.len()))
}

static CDR: PrimitiveFn = PrimitiveFn {
    name: "cdr",
    fn_ptr: cdr_,
    arity: Arity::exactly(1),
};

// A two-element list is a pair, so its cdr is the bare second element.
fn cdr_(args: &[LispObject]) -> evaluator::Result {
    let seq = args[0].as_list()?;
    match seq.len() {
        0 | 1 => Err(evaluator::Error::BadIndex(1, 0..seq.len())),
        2 => Ok(seq[1].clone()),
        _ => Ok(LispObject::wrap_list(seq[1..].to_vec())),
    }
}

static ATOM_TEST: PrimitiveFn = PrimitiveFn {
    name: "atom?",
    fn_ptr: atom_test_,
    arity: Arity::exactly(1),
};

fn atom_test_(args: &[LispObject]) -> evaluator::Result {
    Ok(LispObject::Bool(args[0].is_atom()))
}

/// The fixed set of built-in procedures, consulted once a symbol is found in
/// no frame of the environment chain.
pub fn lookup(name: &str) -> Option<&'static PrimitiveFn> {
    let func = match name {
        // Arithmetic
        "+" => &ADD,
        "-" => &SUB,
        "*" => &MUL,
        "/" => &DIV,
        // Working with lists
        "cons" => &CONS,
        "car" => &CAR,
        "cdr" => &CDR,
        // Testing
        "eq?" => &EQUAL,
        "atom?" => &ATOM_TEST,
        _ => return None,
    };
    Some(func)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list;

    fn call(name: &str, args: &[LispObject]) -> evaluator::Result {
        evaluator::call_primitive(lookup(name).unwrap(), args)
    }

    #[test]
    fn integer_arithmetic_stays_integral() {
        assert_eq!(call("+", &[1.into(), 2.into()]).unwrap(), LispObject::Integer(3));
        assert_eq!(call("-", &[1.into(), 2.into()]).unwrap(), LispObject::Integer(-1));
        assert_eq!(call("*", &[4.into(), 2.into()]).unwrap(), LispObject::Integer(8));
    }

    #[test]
    fn integer_overflow_is_an_error() {
        assert!(matches!(
            call("+", &[LispInt::MAX.into(), 1.into()]),
            Err(evaluator::Error::IntegerOverflow("+"))
        ));
        assert!(matches!(
            call("-", &[LispInt::MIN.into(), 1.into()]),
            Err(evaluator::Error::IntegerOverflow("-"))
        ));
        assert!(matches!(
            call("*", &[LispInt::MAX.into(), 2.into()]),
            Err(evaluator::Error::IntegerOverflow("*"))
        ));
        assert_eq!(
            call("+", &[(LispInt::MAX - 1).into(), 1.into()]).unwrap(),
            LispObject::Integer(LispInt::MAX)
        );
    }

    #[test]
    fn float_contagion() {
        match call("+", &[1.into(), 0.5.into()]).unwrap() {
            LispObject::Float(x) => assert_eq!(x, 1.5),
            other => panic!("expected a float, got {:?}", other),
        }
    }

    #[test]
    fn division_is_true_division() {
        match call("/", &[5.into(), 2.into()]).unwrap() {
            LispObject::Float(x) => assert_eq!(x, 2.5),
            other => panic!("expected a float, got {:?}", other),
        }
        assert!(matches!(
            call("/", &[5.into(), 0.into()]),
            Err(evaluator::Error::DivideByZero)
        ));
    }

    #[test]
    fn arithmetic_rejects_non_numbers() {
        assert!(matches!(
            call("+", &[1.into(), "x".into()]),
            Err(evaluator::Error::TypeMismatch(TypeMismatch::NotANumber))
        ));
    }

    #[test]
    fn cons_prepends_or_pairs() {
        assert_eq!(call("cons", &[1.into(), 2.into()]).unwrap(), list![1, 2]);
        assert_eq!(
            call("cons", &[1.into(), list![2, 3]]).unwrap(),
            list![1, 2, 3]
        );
    }

    #[test]
    fn car_and_cdr() {
        assert_eq!(call("car", &[list![1, 2]]).unwrap(), LispObject::Integer(1));
        assert_eq!(call("cdr", &[list![1, 2]]).unwrap(), LispObject::Integer(2));
        assert_eq!(call("cdr", &[list![1, 2, 3]]).unwrap(), list![2, 3]);
        assert!(matches!(
            call("car", &[list![]]),
            Err(evaluator::Error::BadIndex(0, _))
        ));
        assert!(matches!(
            call("cdr", &[list![1]]),
            Err(evaluator::Error::BadIndex(1, _))
        ));
    }

    #[test]
    fn atom_test() {
        assert_eq!(call("atom?", &[1.into()]).unwrap(), LispObject::Bool(true));
        assert_eq!(call("atom?", &["a".into()]).unwrap(), LispObject::Bool(true));
        assert_eq!(call("atom?", &[list![1, 2]]).unwrap(), LispObject::Bool(false));
    }

    #[test]
    fn unknown_names() {
        assert!(lookup("define").is_none());
        assert!(lookup("car").is_some());
    }
}
