#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        early_bound in variable is OK
        "outer"
        "outer"
    }

    tests! {
        in_middle_of_block in variable is OK
        "a"
        "a b"
        "a c"
        "a b d"
    }

    tests! {
        in_nested_block in variable is OK
        "outer"
    }

    tests! {
        redefine_global in variable is OK
        "2"
    }

    tests! {
        shadow_and_local in variable is OK
        "outer"
        "inner"
    }

    tests! {
        shadow_global in variable is OK
        "shadow"
        "global"
    }

    tests! {
        shadow_local in variable is OK
        "shadow"
        "local"
    }

    tests! {
        uninitialized in variable is OK
        "nil"
    }

    tests! {
        use_global_in_initializer in variable is OK
        "value"
    }

    tests! {
        duplicate_local in variable is ERR
        "[line 3] Error at 'a': Already a variable with this name in this scope."
    }

    tests! {
        duplicate_parameter in variable is ERR
        "[line 1] Error at 'arg': Already a variable with this name in this scope."
    }

    tests! {
        use_local_in_initializer in variable is ERR
        "[line 4] Error at 'a': Can't read local variable in its own initializer."
    }

    tests! {
        undefined_global in variable is ERR
        "Undefined variable 'notDefined'."
        "[line 1]"
    }

    tests! {
        undefined_local in variable is ERR
        "Undefined variable 'notDefined'."
        "[line 2]"
    }

    tests! {
        collide_with_parameter in variable is ERR
        "[line 2] Error at 'a': Already a variable with this name in this scope."
    }
}
