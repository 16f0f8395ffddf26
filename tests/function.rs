#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        print in function is OK
        "<fn foo>"
        "<native fn>"
    }

    tests! {
        parameters in function is OK
        "0"
        "1"
        "6"
    }

    tests! {
        recursion in function is OK
        "21"
    }

    tests! {
        mutual_recursion in function is OK
        "true"
        "true"
    }

    tests! {
        empty_body in function is OK
        "nil"
    }

    tests! {
        missing_arguments in function is ERR
        "Expected 2 arguments but got 1."
        "[line 2]"
    }

    tests! {
        extra_arguments in function is ERR
        "Expected 2 arguments but got 4."
        "[line 5]"
    }

    tests! {
        local_mutual_recursion in function is ERR
        "Undefined variable 'isOdd'."
        "[line 4]"
    }
}
