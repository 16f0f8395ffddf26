#[macro_use]
mod common;

#[cfg(test)]
mod number {
    tests! {
        literals in number is OK
        "123"
        "987654"
        "0"
        "123.456"
        "-0.001"
    }

    tests! {
        nan_equality in number is OK
        "false"
        "true"
        "false"
        "true"
    }

    tests! {
        decimal_point_at_eof in number is ERR
        "[line 2] Error at end: Expect property name after '.'."
    }

    tests! {
        leading_dot in number is ERR
        "[line 1] Error at '.': Expect expression."
    }
}
