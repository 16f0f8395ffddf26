#[macro_use]
mod common;

#[cfg(test)]
mod method {
    tests! {
        arity in method is OK
        "no args"
        "1"
        "3"
    }

    tests! {
        empty_block in method is OK
        "nil"
    }

    tests! {
        print_bound_method in method is OK
        "<fn method>"
    }

    tests! {
        not_found in method is ERR
        "Undefined property 'unknown'."
        "[line 2]"
    }

    tests! {
        refer_to_name in method is ERR
        "Undefined variable 'method'."
        "[line 3]"
    }

    tests! {
        extra_arguments in method is ERR
        "Expected 2 arguments but got 4."
        "[line 7]"
    }

    tests! {
        missing_arguments in method is ERR
        "Expected 2 arguments but got 1."
        "[line 4]"
    }
}
