//! Built-in function tables, one read-only schema per engine.

use crate::ast::{FuncParamMode, TypeName};
use crate::catalog::func::{Argument, Function};
use crate::catalog::schema::Schema;
use crate::engine::Engine;

struct Builtin {
    name: &'static str,
    args: &'static [&'static str],
    ret: &'static str,
    nullable: bool,
    /// The last argument repeats.
    variadic: bool,
}

const fn f(name: &'static str, args: &'static [&'static str], ret: &'static str) -> Builtin {
    Builtin { name, args, ret, nullable: false, variadic: false }
}

impl Builtin {
    const fn nullable(self) -> Self {
        Builtin { nullable: true, ..self }
    }

    const fn variadic(self) -> Self {
        Builtin { variadic: true, ..self }
    }

    fn to_function(&self) -> Function {
        let last = self.args.len().saturating_sub(1);
        Function {
            name: self.name.to_string(),
            args: self
                .args
                .iter()
                .enumerate()
                .map(|(i, ty)| Argument {
                    name: None,
                    type_name: TypeName::new("", ty),
                    has_default: false,
                    mode: if self.variadic && i == last { FuncParamMode::Variadic } else { FuncParamMode::In },
                })
                .collect(),
            return_type: Some(TypeName::new("", self.ret)),
            return_type_nullable: self.nullable,
            comment: String::new(),
        }
    }
}

const ANY: &[&str] = &["any"];
const ANY2: &[&str] = &["any", "any"];

static POSTGRESQL: &[Builtin] = &[
    // aggregates
    f("avg", ANY, "numeric").nullable(),
    f("count", &[], "bigint"),
    f("count", ANY, "bigint"),
    f("max", ANY, "any").nullable(),
    f("min", ANY, "any").nullable(),
    f("sum", ANY, "numeric").nullable(),
    f("array_agg", ANY, "anyarray").nullable(),
    f("string_agg", &["text", "text"], "text").nullable(),
    f("bool_and", &["boolean"], "boolean").nullable(),
    f("bool_or", &["boolean"], "boolean").nullable(),
    f("json_agg", ANY, "json").nullable(),
    f("jsonb_agg", ANY, "jsonb").nullable(),
    // conditionals
    f("coalesce", ANY, "any").nullable().variadic(),
    f("nullif", ANY2, "any").nullable(),
    f("greatest", ANY, "any").variadic(),
    f("least", ANY, "any").variadic(),
    // math
    f("abs", &["numeric"], "numeric"),
    f("ceil", &["numeric"], "numeric"),
    f("floor", &["numeric"], "numeric"),
    f("round", &["numeric"], "numeric"),
    f("round", &["numeric", "integer"], "numeric"),
    f("trunc", &["numeric"], "numeric"),
    f("mod", &["numeric", "numeric"], "numeric"),
    f("power", &["numeric", "numeric"], "numeric"),
    f("sqrt", &["numeric"], "numeric"),
    f("random", &[], "double precision"),
    // strings
    f("lower", &["text"], "text"),
    f("upper", &["text"], "text"),
    f("length", &["text"], "integer"),
    f("char_length", &["text"], "integer"),
    f("btrim", &["text"], "text"),
    f("ltrim", &["text"], "text"),
    f("rtrim", &["text"], "text"),
    f("replace", &["text", "text", "text"], "text"),
    f("substr", &["text", "integer"], "text"),
    f("substr", &["text", "integer", "integer"], "text"),
    f("concat", ANY, "text").variadic(),
    f("concat_ws", &["text", "any"], "text").variadic(),
    f("format", &["text", "any"], "text").variadic(),
    f("md5", &["text"], "text"),
    // dates
    f("now", &[], "timestamp with time zone"),
    f("clock_timestamp", &[], "timestamp with time zone"),
    f("date_trunc", &["text", "timestamp"], "timestamp"),
    f("date_part", &["text", "timestamp"], "double precision"),
    f("age", &["timestamp"], "interval"),
    f("age", &["timestamp", "timestamp"], "interval"),
    f("to_char", &["any", "text"], "text"),
    // arrays and sets
    f("array_length", &["anyarray", "integer"], "integer").nullable(),
    f("cardinality", &["anyarray"], "integer"),
    f("unnest", &["anyarray"], "any"),
    f("generate_series", ANY2, "any"),
    f("generate_series", &["any", "any", "any"], "any"),
    // json
    f("to_json", ANY, "json"),
    f("to_jsonb", ANY, "jsonb"),
    f("json_build_object", ANY, "json").variadic(),
    f("jsonb_build_object", ANY, "jsonb").variadic(),
    // misc
    f("gen_random_uuid", &[], "uuid"),
    f("nextval", &["regclass"], "bigint"),
    f("currval", &["regclass"], "bigint"),
    f("setval", &["regclass", "bigint"], "bigint"),
    f("lastval", &[], "bigint"),
];

static MYSQL: &[Builtin] = &[
    f("AVG", ANY, "decimal").nullable(),
    f("COUNT", &[], "bigint"),
    f("COUNT", ANY, "bigint"),
    f("MAX", ANY, "any").nullable(),
    f("MIN", ANY, "any").nullable(),
    f("SUM", ANY, "decimal").nullable(),
    f("GROUP_CONCAT", ANY, "text").nullable().variadic(),
    f("ANY_VALUE", ANY, "any"),
    f("BIT_AND", ANY, "bigint"),
    f("BIT_OR", ANY, "bigint"),
    f("COALESCE", ANY, "any").nullable().variadic(),
    f("IFNULL", ANY2, "any"),
    f("NULLIF", ANY2, "any").nullable(),
    f("IF", &["any", "any", "any"], "any"),
    f("GREATEST", ANY2, "any").variadic(),
    f("LEAST", ANY2, "any").variadic(),
    f("ABS", ANY, "any"),
    f("CEIL", ANY, "bigint"),
    f("CEILING", ANY, "bigint"),
    f("FLOOR", ANY, "bigint"),
    f("ROUND", ANY, "any"),
    f("ROUND", ANY2, "any"),
    f("TRUNCATE", ANY2, "any"),
    f("MOD", ANY2, "any"),
    f("POW", ANY2, "double"),
    f("POWER", ANY2, "double"),
    f("RAND", &[], "double"),
    f("RAND", ANY, "double"),
    f("LOWER", ANY, "text"),
    f("UPPER", ANY, "text"),
    f("LENGTH", ANY, "bigint"),
    f("CHAR_LENGTH", ANY, "bigint"),
    f("TRIM", ANY, "text"),
    f("REPLACE", &["any", "any", "any"], "text"),
    f("SUBSTRING", ANY2, "text"),
    f("SUBSTRING", &["any", "any", "any"], "text"),
    f("CONCAT", ANY, "text").nullable().variadic(),
    f("CONCAT_WS", &["text", "any"], "text").variadic(),
    f("MD5", ANY, "text"),
    f("UUID", &[], "text"),
    f("NOW", &[], "datetime"),
    f("CURRENT_TIMESTAMP", &[], "datetime"),
    f("CURDATE", &[], "date"),
    f("CURTIME", &[], "time"),
    f("DATE", ANY, "date"),
    f("DATEDIFF", ANY2, "bigint"),
    f("DATE_FORMAT", &["any", "text"], "text"),
    f("UNIX_TIMESTAMP", &[], "bigint"),
    f("UNIX_TIMESTAMP", ANY, "bigint"),
    f("FROM_UNIXTIME", ANY, "datetime"),
    f("LAST_INSERT_ID", &[], "bigint"),
    f("FOUND_ROWS", &[], "bigint"),
    f("JSON_EXTRACT", &["json", "text"], "json").variadic(),
    f("JSON_OBJECT", ANY, "json").variadic(),
    f("JSON_ARRAY", ANY, "json").variadic(),
];

static SQLITE: &[Builtin] = &[
    // aggregates
    f("AVG", ANY, "real").nullable(),
    f("COUNT", &[], "integer"),
    f("COUNT", ANY, "integer"),
    f("GROUP_CONCAT", ANY, "text"),
    f("GROUP_CONCAT", &["any", "text"], "text"),
    f("MAX", ANY, "any").nullable(),
    f("MIN", ANY, "any").nullable(),
    f("SUM", ANY, "real").nullable(),
    f("TOTAL", ANY, "real"),
    // math
    f("ACOS", ANY, "real"),
    f("ACOSH", ANY, "real"),
    f("ASIN", ANY, "real"),
    f("ASINH", ANY, "real"),
    f("ATAN", ANY, "real"),
    f("ATAN2", ANY2, "real"),
    f("ATANH", ANY, "real"),
    f("CEIL", ANY, "integer"),
    f("CEILING", ANY, "integer"),
    f("COS", ANY, "real"),
    f("COSH", ANY, "real"),
    f("DEGREES", ANY, "real"),
    f("EXP", ANY, "real"),
    f("FLOOR", ANY, "integer"),
    f("LN", ANY, "real"),
    f("LOG", ANY, "real"),
    f("LOG10", ANY, "real"),
    f("LOG", ANY2, "real"),
    f("LOG2", ANY, "real"),
    f("MOD", ANY2, "real"),
    f("PI", &[], "real"),
    f("POW", ANY2, "real"),
    f("POWER", ANY2, "real"),
    f("RADIANS", ANY, "real"),
    f("SIN", ANY, "real"),
    f("SINH", ANY, "real"),
    f("SQRT", ANY, "real"),
    f("TAN", ANY, "real"),
    f("TANH", ANY, "real"),
    f("TRUNC", ANY, "integer"),
    // core
    f("ABS", ANY, "any"),
    f("COALESCE", ANY2, "any").nullable().variadic(),
    f("IFNULL", ANY2, "any").nullable(),
    f("NULLIF", ANY2, "any").nullable(),
    f("LENGTH", ANY, "integer"),
    f("LOWER", &["text"], "text"),
    f("UPPER", &["text"], "text"),
    f("TRIM", &["text"], "text"),
    f("TRIM", &["text", "text"], "text"),
    f("REPLACE", &["text", "text", "text"], "text"),
    f("SUBSTR", &["text", "integer"], "text"),
    f("SUBSTR", &["text", "integer", "integer"], "text"),
    f("INSTR", &["text", "text"], "integer"),
    f("ROUND", ANY, "real"),
    f("ROUND", ANY2, "real"),
    f("RANDOM", &[], "integer"),
    f("PRINTF", &["text", "any"], "text").variadic(),
    f("LAST_INSERT_ROWID", &[], "integer"),
    f("CHANGES", &[], "integer"),
    f("DATE", &["text", "any"], "text").variadic(),
    f("DATETIME", &["text", "any"], "text").variadic(),
    f("STRFTIME", &["text", "text", "any"], "text").variadic(),
    f("JSON", ANY, "text"),
    f("JSON_EXTRACT", &["any", "text"], "any").variadic(),
];

/// The read-only schema holding `engine`'s built-in functions.
pub(crate) fn schema(engine: Engine) -> Schema {
    let table = match engine {
        Engine::PostgreSQL => POSTGRESQL,
        Engine::MySQL => MYSQL,
        Engine::SQLite => SQLITE,
    };
    Schema {
        name: engine.builtin_schema().to_string(),
        funcs: table.iter().map(Builtin::to_function).collect(),
        builtin: true,
        ..Default::default()
    }
}
