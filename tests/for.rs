#[macro_use]
mod common;

#[cfg(test)]
mod for_stmt {
    tests! {
        scope in for is OK
        "0"
        "before"
    }

    tests! {
        syntax in for is OK
        "1"
        "2"
        "3"
        "0"
        "1"
        "2"
    }

    tests! {
        closure_in_body in for is OK
        "1"
    }

    tests! {
        var_in_body in for is ERR
        "[line 1] Error at 'var': Expect expression."
    }
}
