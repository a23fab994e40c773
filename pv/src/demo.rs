//! Built-in example plan
//!
//! A captured real response from the planning service, used by `pv demo`
//! to render the full section set without a backend. Covers every field
//! shape the resolver knows about, including the legacy map-shaped
//! `file_breakdown` and the unrendered `best_practices` extra.

use serde_json::{Value, json};

/// The example plan document.
pub fn sample_plan() -> Value {
    json!({
        "project_name": "Simple Calculator App",
        "project_description": "A basic calculator application that performs standard arithmetic operations. It provides a user-friendly graphical interface built with Tkinter.",
        "target_audience": "Individuals needing a quick and easy tool for performing basic calculations, students learning programming concepts.",
        "technical_requirements": {
            "python_version": "3.9+",
            "dependencies": ["tkinter"],
            "gui_framework": "Tkinter",
            "gui_framework_justification": "Tkinter is chosen for its simplicity and suitability for creating basic desktop applications. It's lightweight and comes pre-installed with Python.",
            "database_requirements": "None",
            "external_apis": "None"
        },
        "project_structure": {
            "root_directory": "calculator_app",
            "directories": [
                {"name": "src", "purpose": "Contains the main source code of the calculator application."},
                {"name": "tests", "purpose": "Contains unit tests for the application."}
            ],
            "files": [
                {"path": "calculator_app/src/calculator.py", "purpose": "Main application logic and GUI.", "entry_point": true},
                {"path": "calculator_app/tests/test_calculator.py", "purpose": "Unit tests for calculator functions."},
                {"path": "calculator_app/README.md", "purpose": "Project documentation and usage instructions."}
            ]
        },
        "file_breakdown": {
            "calculator.py": {
                "purpose": "Main application logic and GUI implementation using Tkinter.",
                "dependencies": ["tkinter"],
                "interactions": "This is the main entry point of the application. It imports functions from other modules if any."
            },
            "test_calculator.py": {
                "purpose": "Unit tests for the calculator functions.",
                "dependencies": ["unittest", "src/calculator.py (import functions)"],
                "interactions": "Tests the functions defined in calculator.py"
            }
        },
        "implementation_strategy": {
            "development_phases": [
                "1. Set up project structure and Tkinter window.",
                "2. Implement number and operator buttons.",
                "3. Add calculation logic.",
                "4. Implement error handling.",
                "5. Add unit tests.",
                "6. Final testing and documentation."
            ],
            "critical_components": ["Tkinter GUI setup", "Calculation logic"],
            "test_file_requirements": "The `test_calculator.py` file should contain test functions for each operation (addition, subtraction, multiplication, division) and edge cases (division by zero, invalid input).",
            "testing_strategy": "Use the `unittest` module to create unit tests for each arithmetic operation. Test for normal cases and edge cases like division by zero.",
            "deployment_considerations": "Since it's a Tkinter application, it can be run directly on any system with Python and Tkinter installed."
        },
        "best_practices": {
            "code_organization": "Follow PEP 8 guidelines for code style. Use meaningful variable names and comments to improve readability.",
            "error_handling": "Implement `try-except` blocks to handle potential errors, such as division by zero or invalid input.",
            "documentation_requirements": "For this simple project, a basic README file explaining how to run the application is sufficient."
        }
    })
}
